//! Agent resolution and invocation

use std::{sync::Arc, time::Duration};

use serde_json::Value;

use crate::{
    agent::{Agent, AgentMessage, AgentRegistry, Generation},
    pipeline::normalize::normalize,
    protocol::{
        error::{BridgeError, BridgeResult},
        message::Message,
    },
    service::request::{TaskParams, TaskRequest},
};

/// Everything the assembler needs once the agent has answered
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub request_id: Value,
    pub agent_id: String,

    /// Caller-supplied context id
    pub context_id: Option<String>,

    /// Caller-supplied task id
    pub task_id: Option<String>,

    /// Input messages as received, in order
    pub messages: Vec<Message>,

    /// The agent's complete output
    pub generation: Generation,
}

/// Resolves the target agent and invokes it with the normalized conversation
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<dyn AgentRegistry>,
    invocation_timeout: Option<Duration>,
}

impl Dispatcher {
    pub fn new(registry: Arc<dyn AgentRegistry>, invocation_timeout: Option<Duration>) -> Self {
        Self {
            registry,
            invocation_timeout,
        }
    }

    /// Run lookup, message extraction, normalization and invocation
    ///
    /// # Errors
    ///
    /// - [`BridgeError::AgentNotFound`] if the registry has no such agent
    /// - [`BridgeError::NoMessagesProvided`] if params resolve to no messages
    /// - [`BridgeError::InvocationTimeout`] if the agent is too slow
    /// - [`BridgeError::Internal`] if params cannot be decoded or the agent fails
    pub async fn dispatch(&self, request: TaskRequest) -> BridgeResult<Dispatched> {
        let TaskRequest {
            request_id,
            agent_id,
            params,
        } = request;

        let agent = self
            .registry
            .lookup(&agent_id)
            .ok_or_else(|| BridgeError::AgentNotFound {
                id: request_id.clone(),
                agent_id: agent_id.clone(),
            })?;

        let mut params = TaskParams::from_value(params)?;
        let messages = params.take_messages();
        if messages.is_empty() {
            return Err(BridgeError::NoMessagesProvided { id: request_id });
        }

        let normalized = normalize(&messages);
        tracing::debug!(
            agent_id = %agent_id,
            messages = normalized.len(),
            "invoking agent"
        );
        let generation = self.invoke(agent.as_ref(), normalized, &request_id).await?;

        Ok(Dispatched {
            request_id,
            agent_id,
            context_id: params.context_id,
            task_id: params.task_id,
            messages,
            generation,
        })
    }

    async fn invoke(
        &self,
        agent: &dyn Agent,
        messages: Vec<AgentMessage>,
        request_id: &Value,
    ) -> BridgeResult<Generation> {
        let call = agent.generate(messages);

        let result = match self.invocation_timeout {
            Some(timeout) => tokio::time::timeout(timeout, call).await.map_err(|_| {
                BridgeError::InvocationTimeout {
                    id: request_id.clone(),
                    timeout,
                }
            })?,
            None => call.await,
        };

        result.map_err(BridgeError::Internal)
    }
}
