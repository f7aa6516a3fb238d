//! Bridge configuration

use std::time::Duration;

/// Configuration for the task bridge
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Upper bound on a single agent invocation, `None` waits indefinitely
    pub invocation_timeout: Option<Duration>,
}

impl BridgeConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self {
            invocation_timeout: Some(Duration::from_secs(30)),
        }
    }

    /// Set the invocation timeout
    pub fn with_invocation_timeout(mut self, timeout: Duration) -> Self {
        self.invocation_timeout = Some(timeout);
        self
    }

    /// Wait for agents indefinitely
    pub fn without_invocation_timeout(mut self) -> Self {
        self.invocation_timeout = None;
        self
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
