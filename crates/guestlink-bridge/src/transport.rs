//! The outbound seam between the bridge and its host.

use std::io::Write;

use crate::envelope::GuestMessage;
use crate::error::TransportError;

/// Capability to deliver an envelope to the host.
///
/// Injected into the bridge so tests can substitute an in-memory double and
/// assert on captured envelopes. Delivery is fire-and-forget: the transport
/// is assumed ordered and lossless, no acknowledgement is awaited, and the
/// bridge never retries.
pub trait HostTransport {
    fn send(&mut self, msg: &GuestMessage) -> Result<(), TransportError>;
}

/// Writes one JSON envelope per line to any `Write` stream.
///
/// This is the production transport of the CLI harness, where the host reads
/// envelopes off the harness's stdout.
pub struct JsonLineTransport<W> {
    inner: W,
}

impl<W: Write> JsonLineTransport<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Borrow the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consume the transport and return the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> HostTransport for JsonLineTransport<W> {
    fn send(&mut self, msg: &GuestMessage) -> Result<(), TransportError> {
        serde_json::to_writer(&mut self.inner, msg)?;
        self.inner.write_all(b"\n")?;
        self.inner.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_envelope_per_line() {
        let mut transport = JsonLineTransport::new(Vec::new());

        transport
            .send(&GuestMessage::Loaded {
                session_id: "sim-1".to_string(),
            })
            .unwrap();
        transport
            .send(&GuestMessage::WriteDebugBuffer {
                session_id: "sim-1".to_string(),
                data: vec![0, 0, 0, 1, 7],
            })
            .unwrap();

        let written = String::from_utf8(transport.into_inner()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"msgId":"loaded","sessionId":"sim-1"}"#);
        assert!(lines[1].starts_with(r#"{"msgId":"write-debug-buffer""#));
    }

    #[test]
    fn io_failure_surfaces_as_transport_error() {
        struct BrokenWriter;

        impl Write for BrokenWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut transport = JsonLineTransport::new(BrokenWriter);
        let err = transport
            .send(&GuestMessage::Loaded {
                session_id: "x".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, TransportError::Json(_) | TransportError::Io(_)));
    }
}
