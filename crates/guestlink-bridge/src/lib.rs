//! Host-guest communication bridge.
//!
//! A sandboxed, cooperative virtual device (the guest) exchanges two
//! independent byte streams with an outer host process: a command channel and
//! a debug channel. The host pushes tagged JSON envelopes at the bridge; the
//! guest polls the bridge, once per scheduling tick, for length-prefixed
//! frames. A synthetic stdin feed presents a blocking-style character source
//! to the guest without ever actually blocking its execution loop.
//!
//! Everything is single-threaded and cooperative: no locks, no threads, no
//! async. The embedding runtime calls in synchronously and repeatedly.

pub mod bridge;
pub mod channel;
pub mod envelope;
pub mod error;
pub mod session;
pub mod status;
pub mod stdin;
pub mod transport;

pub use bridge::{Bridge, GuestHooks, NoHooks};
pub use channel::{Channel, ChannelQueue};
pub use envelope::{GuestMessage, HostMessage};
pub use error::TransportError;
pub use session::{Session, SessionId};
pub use status::{parse_progress, Progress, StatusThrottle, StatusUpdate};
pub use stdin::{CommandInjector, StdinEmulator, CARRIAGE_RETURN, DEFAULT_INJECT_DELAY};
pub use transport::{HostTransport, JsonLineTransport};
