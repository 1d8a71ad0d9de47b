//! Error types for chainprobe-core.

use thiserror::Error;

/// Error type for chainprobe-core operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Processor slot command queue is full")]
    SlotBusy,
}

/// Result type alias.
pub type Result<T> = core::result::Result<T, Error>;
