//! Error types for chainprobe-net.

use thiserror::Error;

/// Error type for payload and reply handling.
#[derive(Error, Debug)]
pub enum NetError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, NetError>;
