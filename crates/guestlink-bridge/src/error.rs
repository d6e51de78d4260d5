/// Errors that can occur while sending an envelope to the host.
///
/// These never cross the guest boundary: the bridge logs and drops them,
/// since delivery is fire-and-forget and the guest has no way to recover
/// from a transport fault.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Envelope serialization failed.
    #[error("envelope encode error: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying writer failed.
    #[error("host I/O error: {0}")]
    Io(#[from] std::io::Error),
}
