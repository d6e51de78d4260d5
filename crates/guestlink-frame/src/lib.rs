//! Length-prefixed payload framing for the guestlink bridge.
//!
//! Every payload crossing the host/guest boundary is framed with a 4-byte
//! big-endian length header followed by exactly that many payload bytes:
//!
//! ```text
//! ┌──────────────┬──────────────────┐
//! │ Length (4B)  │ Payload          │
//! │ big-endian   │ (Length bytes)   │
//! └──────────────┴──────────────────┘
//! ```
//!
//! The guest-facing bridge only ever encodes; decoding is performed by the
//! host side (and by the CLI harness, which plays the host).

pub mod codec;
pub mod error;

pub use codec::{decode_frame, encode_frame, frame, HEADER_SIZE};
pub use error::{FrameError, Result};
