//! Bridge service request types

use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    codec::JsonRpcRequest,
    protocol::message::{opaque_id, Message},
};

/// A raw request addressed to one agent endpoint
///
/// This is what the validation layer receives: the decoded envelope exactly as
/// sent, plus the agent id taken from the endpoint path.
#[derive(Debug, Clone)]
pub struct BridgeRequest {
    /// Identifier of the target agent
    pub agent_id: String,

    /// The envelope as received
    pub envelope: JsonRpcRequest,
}

impl BridgeRequest {
    /// Create a new bridge request
    pub fn new(agent_id: impl Into<String>, envelope: JsonRpcRequest) -> Self {
        Self {
            agent_id: agent_id.into(),
            envelope,
        }
    }
}

/// A request whose envelope passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRequest {
    /// The caller's request id, never null
    pub request_id: Value,

    /// Identifier of the target agent
    pub agent_id: String,

    /// Undecoded `params`; decoding waits until the agent is known to exist
    pub params: Option<Value>,
}

/// Decoded `params` of a task request
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TaskParams {
    /// A single message
    #[serde(default)]
    pub message: Option<Message>,

    /// A list of messages, `None` when absent or not an array
    #[serde(default, deserialize_with = "messages_if_sequence")]
    pub messages: Option<Vec<Message>>,

    /// Context to continue
    #[serde(rename = "contextId", default, deserialize_with = "opaque_id")]
    pub context_id: Option<String>,

    /// Task to continue
    #[serde(rename = "taskId", default, deserialize_with = "opaque_id")]
    pub task_id: Option<String>,
}

impl TaskParams {
    /// Decode params; anything other than an object decodes as empty params
    pub fn from_value(params: Option<Value>) -> Result<Self, serde_json::Error> {
        match params {
            Some(obj @ Value::Object(_)) => serde_json::from_value(obj),
            _ => Ok(Self::default()),
        }
    }

    /// Take the messages to send
    ///
    /// A singular `message` wins over `messages`.
    pub fn take_messages(&mut self) -> Vec<Message> {
        match self.message.take() {
            Some(message) => vec![message],
            None => self.messages.take().unwrap_or_default(),
        }
    }
}

fn messages_if_sequence<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<Message>>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(D::Error::custom))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        _ => Ok(None),
    }
}
