//! A trivial agent that repeats the latest message back

use async_trait::async_trait;

use super::{Agent, AgentMessage, Generation};

/// Replies with the content of the last message it was given
///
/// Useful for smoke-testing a deployment without a model behind it.
#[derive(Debug, Clone, Default)]
pub struct EchoAgent {
    prefix: Option<String>,
}

impl EchoAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend a fixed prefix to every reply
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }
}

#[async_trait]
impl Agent for EchoAgent {
    async fn generate(&self, messages: Vec<AgentMessage>) -> anyhow::Result<Generation> {
        let last = messages
            .last()
            .map(|msg| msg.content.as_str())
            .unwrap_or_default();

        let text = match &self.prefix {
            Some(prefix) => format!("{prefix}{last}"),
            None => last.to_string(),
        };

        Ok(Generation::text(text))
    }
}
