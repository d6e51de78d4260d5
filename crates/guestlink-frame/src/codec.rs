use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{FrameError, Result};

/// Frame header: payload length (4 bytes, big-endian).
pub const HEADER_SIZE: usize = 4;

/// Encode a payload into the wire format, appending to `dst`.
///
/// The header value always equals the payload length. Empty payloads are
/// legal and encode as four zero bytes.
pub fn encode_frame(payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    if payload.len() > u32::MAX as usize {
        return Err(FrameError::PayloadTooLarge {
            size: payload.len(),
            max: u32::MAX as usize,
        });
    }
    dst.reserve(HEADER_SIZE + payload.len());
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    Ok(())
}

/// Encode a payload into a freshly allocated frame.
pub fn frame(payload: &[u8]) -> Result<Bytes> {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    encode_frame(payload, &mut buf)?;
    Ok(buf.freeze())
}

/// Decode one frame from a buffer, returning its payload.
///
/// Returns `None` if the buffer doesn't contain a complete frame yet; a
/// truncated frame simply pends until the rest of its bytes arrive. On
/// success, consumes the frame bytes from the buffer.
pub fn decode_frame(src: &mut BytesMut) -> Option<Bytes> {
    if src.len() < HEADER_SIZE {
        return None;
    }

    let payload_len = u32::from_be_bytes(src[..HEADER_SIZE].try_into().unwrap()) as usize;

    if src.len() < HEADER_SIZE + payload_len {
        return None; // Need more data
    }

    src.advance(HEADER_SIZE);
    Some(src.split_to(payload_len).freeze())
}
