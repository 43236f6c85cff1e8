use thiserror::Error;

use medscan_common::error::CameraError;

/// Failures talking to the verification service.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid service url: {0}")]
    InvalidUrl(String),
    #[error("verification service unreachable: {0}")]
    Unreachable(String),
    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("a scan session is already running")]
    AlreadyActive,
    #[error(transparent)]
    Camera(#[from] CameraError),
}
