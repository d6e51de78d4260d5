//! JSON envelopes exchanged with the host.
//!
//! Both directions are closed unions over the `msgId` tag. Unknown inbound
//! tags deserialize to [`HostMessage::Unknown`] and are dropped by the router
//! (forward-compatibility policy: never an error).

use serde::{Deserialize, Serialize};

/// Inbound message, host → bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "msgId")]
pub enum HostMessage {
    /// Append `data` to the command channel queue.
    #[serde(rename = "write-command-channel")]
    WriteCommandChannel { data: Vec<u8> },

    /// Append `data` to the debug channel queue.
    #[serde(rename = "write-debug-channel")]
    WriteDebugChannel { data: Vec<u8> },

    /// A debugger client attached on the host side.
    #[serde(rename = "debugger-client-connected")]
    DebuggerClientConnected,

    /// The debugger client detached.
    #[serde(rename = "debugger-client-disconnected")]
    DebuggerClientDisconnected,

    /// Any unrecognized tag. Silently ignored.
    #[serde(other)]
    Unknown,
}

/// Outbound message, bridge → host.
///
/// The session identity is attached to every variant; in the wire format the
/// `data` field of buffer messages always carries a framed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "msgId")]
pub enum GuestMessage {
    /// One-shot startup notification.
    #[serde(rename = "loaded")]
    Loaded {
        #[serde(rename = "sessionId")]
        session_id: String,
    },

    /// Framed bytes produced by the guest on the command channel.
    #[serde(rename = "write-command-buffer")]
    WriteCommandBuffer {
        #[serde(rename = "sessionId")]
        session_id: String,
        data: Vec<u8>,
    },

    /// Framed bytes produced by the guest on the debug channel.
    #[serde(rename = "write-debug-buffer")]
    WriteDebugBuffer {
        #[serde(rename = "sessionId")]
        session_id: String,
        data: Vec<u8>,
    },
}

impl GuestMessage {
    /// The session identity attached to this message.
    pub fn session_id(&self) -> &str {
        match self {
            GuestMessage::Loaded { session_id }
            | GuestMessage::WriteCommandBuffer { session_id, .. }
            | GuestMessage::WriteDebugBuffer { session_id, .. } => session_id,
        }
    }
}
