//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Endpoint is not a WebSocket URL
    #[error("Invalid endpoint '{0}': expected a ws:// or wss:// URL")]
    InvalidEndpoint(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Outbound text could not be queued
    #[error("Failed to send message: {0}")]
    SendFailed(String),
}
