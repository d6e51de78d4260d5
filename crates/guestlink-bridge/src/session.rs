//! Session identity and operating mode.

use std::fmt;

/// Opaque token identifying this guest instance to the host.
///
/// Set once at startup from the embedding context, immutable for the process
/// lifetime, and attached to every outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl From<String> for SessionId {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// The process-wide operating mode, selected once at startup.
///
/// The two modes are mutually exclusive: a session token means the guest is
/// embedded by a host (UI hidden, traffic bridged); no token means it runs
/// standalone (UI visible, no host to talk to).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// No embedding host. Outbound traffic has nowhere to go.
    Standalone,
    /// Embedded under a host identified to by this token.
    Embedded(SessionId),
}

impl Session {
    /// Select the mode from an optional token supplied by the embedding
    /// context. An empty token counts as absent.
    pub fn from_token(token: Option<String>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Session::Embedded(SessionId(token)),
            _ => Session::Standalone,
        }
    }

    pub fn is_embedded(&self) -> bool {
        matches!(self, Session::Embedded(_))
    }

    /// The session identity, if embedded.
    pub fn id(&self) -> Option<&SessionId> {
        match self {
            Session::Standalone => None,
            Session::Embedded(id) => Some(id),
        }
    }
}
