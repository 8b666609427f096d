//! Error types for the device control client

use shared::message::Operation;
use thiserror::Error;

/// Client error types
///
/// Every operation either resolves with its typed success value or rejects
/// with exactly one of these.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The control channel could not be established or is not available.
    /// Calls made while disconnected fail fast with this; connection loss
    /// during a call also surfaces as this.
    #[error("connection error: {0}")]
    Connection(String),

    /// A specific request exceeded its budget. The caller decides whether
    /// to retry.
    #[error("timeout waiting for {operation} response")]
    Timeout { operation: Operation },

    /// The control service reported a failure for a specific device.
    #[error("device {device_id}: {message}")]
    Device { device_id: String, message: String },

    /// A message could not be encoded or decoded.
    #[error("invalid message: {0}")]
    InvalidMessage(String),

    /// IO error on the control channel
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
