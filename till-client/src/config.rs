//! Client configuration

use shared::message::DEFAULT_ENDPOINT;
use std::time::Duration;

/// Device control client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Address of the local device-control service.
    pub endpoint: String,
    /// Fixed delay between reconnection attempts.
    pub reconnect_delay: Duration,
    /// Maximum reconnection attempts after a lost connection.
    pub max_reconnect_attempts: u32,
    /// Override for the per-operation timeout table (tests, slow links).
    /// `None` uses the operation's own budget.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    /// Local-machine defaults: the service is on loopback, so reconnect
    /// quickly and give up after 20 attempts.
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            reconnect_delay: Duration::from_millis(500),
            max_reconnect_attempts: 20,
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }
}
