//! HTTP access to the board backend. One [`ApiClient`] is shared by every
//! store; it owns the base URL, the session cookie jar, and the transport
//! timeout.

mod client;

pub use client::{ApiClient, UploadReceipt};

/// Failure taxonomy for remote calls. Transport failures and backend
/// rejections are distinct so callers can tell a dead network from a 4xx.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("response decoding failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ApiError {
    /// Convenience probe for handlers that branch on the backend status.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
