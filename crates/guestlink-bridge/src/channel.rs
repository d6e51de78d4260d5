//! Logical channels and their inbound queues.

use std::collections::VecDeque;

use bytes::Bytes;

/// One of the two independent byte-stream conversations multiplexed over the
/// host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Control/command traffic (SCPI).
    Command,
    /// Debugger traffic.
    Debug,
}

impl Channel {
    /// Stable lowercase name, used in log fields.
    pub fn name(self) -> &'static str {
        match self {
            Channel::Command => "command",
            Channel::Debug => "debug",
        }
    }
}

/// Ordered, unbounded FIFO of raw (unframed) payloads awaiting consumption
/// by the guest.
///
/// Ordering is the only invariant: no capacity bound, no deduplication.
/// Growth is unbounded if the guest never polls; there is no backpressure
/// signal in this protocol.
#[derive(Debug, Default)]
pub struct ChannelQueue {
    entries: VecDeque<Bytes>,
}

impl ChannelQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a payload to the back of the queue.
    pub fn push(&mut self, payload: impl Into<Bytes>) {
        self.entries.push_back(payload.into());
    }

    /// Remove and return the oldest payload, or `None` if the queue is empty.
    ///
    /// Empty is a normal, frequent state, not a closed channel.
    pub fn pop(&mut self) -> Option<Bytes> {
        self.entries.pop_front()
    }

    /// Number of pending payloads.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the queue holds no pending payloads.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
