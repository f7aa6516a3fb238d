//! Agent collaborators
//!
//! The bridge never generates replies itself. It hands normalized messages to
//! an [`Agent`] found through an [`AgentRegistry`] and reports whatever the
//! agent returns.

pub mod echo;
pub mod registry;

pub use echo::EchoAgent;
pub use registry::{AgentRegistry, InMemoryRegistry};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message in the flat form agents consume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentMessage {
    pub role: String,
    pub content: String,
}

impl AgentMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Complete output of one agent invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    /// Generated reply text
    #[serde(default)]
    pub text: String,

    /// Structured results of any tools the agent called
    #[serde(rename = "toolResults", default)]
    pub tool_results: Vec<Value>,
}

impl Generation {
    /// A generation with text only
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tool_results: Vec::new(),
        }
    }

    /// Add a tool result
    pub fn with_tool_result(mut self, result: Value) -> Self {
        self.tool_results.push(result);
        self
    }
}

/// An invocable conversational agent
///
/// Implementations return the full reply in one piece; the bridge does not
/// consume partial output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Agent: Send + Sync {
    /// Generate a reply to the conversation so far
    ///
    /// # Errors
    ///
    /// Any error is reported to the caller as an internal error.
    async fn generate(&self, messages: Vec<AgentMessage>) -> anyhow::Result<Generation>;
}
