//! Client configuration.

use crate::error::ClientError;

/// Relay endpoint used when none is given.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080";

/// Prompt shown in front of the input line.
pub const DEFAULT_PROMPT: &str = "> ";

/// Settings for one client session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// WebSocket URL of the relay endpoint
    pub url: String,
    /// Prompt text for the terminal input line
    pub prompt: String,
}

impl ClientConfig {
    /// Create a configuration, rejecting URLs that are not `ws://` or `wss://`.
    pub fn new(url: impl Into<String>, prompt: impl Into<String>) -> Result<Self, ClientError> {
        let url = url.into();
        if !is_websocket_url(&url) {
            return Err(ClientError::InvalidEndpoint(url));
        }

        Ok(Self {
            url,
            prompt: prompt.into(),
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENDPOINT.to_string(),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

fn is_websocket_url(url: &str) -> bool {
    ["ws://", "wss://"].iter().any(|scheme| {
        url.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
            && url.len() > scheme.len()
    })
}
