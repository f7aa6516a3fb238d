//! Error types for the task bridge
//!
//! Every failure a request can hit is a [`BridgeError`] variant, and every
//! variant knows how it is reported: JSON-RPC code, HTTP status, the `id` to
//! echo and any extra `data`.

use std::time::Duration;

use serde_json::{json, Value};
use thiserror::Error;

/// JSON-RPC error codes used by the bridge
pub mod codes {
    /// Malformed envelope
    pub const INVALID_REQUEST: i64 = -32600;

    /// Unknown agent or no messages in params
    pub const INVALID_PARAMS: i64 = -32602;

    /// Anything unexpected during processing
    pub const INTERNAL_ERROR: i64 = -32603;

    /// Agent invocation exceeded the configured timeout
    pub const INVOCATION_TIMEOUT: i64 = -32001;
}

/// Main error type for bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Wrong protocol version or missing request id
    #[error("Invalid Request: jsonrpc must be \"2.0\" and id is required")]
    InvalidRequest {
        /// The request id, if the caller supplied one
        id: Option<Value>,
    },

    /// No agent is registered under the requested id
    #[error("Agent '{agent_id}' not found")]
    AgentNotFound { id: Value, agent_id: String },

    /// Neither `message` nor `messages` yielded anything to send
    #[error("No messages provided in params")]
    NoMessagesProvided { id: Value },

    /// The agent did not answer within the configured timeout
    #[error("Agent invocation timed out after {}ms", .timeout.as_millis())]
    InvocationTimeout { id: Value, timeout: Duration },

    /// Unexpected failure while decoding, normalizing or invoking
    #[error("Internal error")]
    Internal(#[source] anyhow::Error),
}

impl BridgeError {
    /// Wrap any error as an internal failure
    pub fn internal(err: impl Into<anyhow::Error>) -> Self {
        BridgeError::Internal(err.into())
    }

    /// JSON-RPC error code
    pub fn code(&self) -> i64 {
        match self {
            BridgeError::InvalidRequest { .. } => codes::INVALID_REQUEST,
            BridgeError::AgentNotFound { .. } | BridgeError::NoMessagesProvided { .. } => {
                codes::INVALID_PARAMS
            }
            BridgeError::InvocationTimeout { .. } => codes::INVOCATION_TIMEOUT,
            BridgeError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// HTTP status the error is reported with
    pub fn http_status(&self) -> u16 {
        match self {
            BridgeError::InvalidRequest { .. } | BridgeError::NoMessagesProvided { .. } => 400,
            BridgeError::AgentNotFound { .. } => 404,
            BridgeError::InvocationTimeout { .. } => 504,
            BridgeError::Internal(_) => 500,
        }
    }

    /// The `id` echoed in the error envelope
    ///
    /// Internal failures always report `null`.
    pub fn request_id(&self) -> Value {
        match self {
            BridgeError::InvalidRequest { id } => id.clone().unwrap_or(Value::Null),
            BridgeError::AgentNotFound { id, .. }
            | BridgeError::NoMessagesProvided { id }
            | BridgeError::InvocationTimeout { id, .. } => id.clone(),
            BridgeError::Internal(_) => Value::Null,
        }
    }

    /// Optional `data` member of the error object
    pub fn data(&self) -> Option<Value> {
        match self {
            BridgeError::Internal(source) => Some(json!({ "details": source.to_string() })),
            _ => None,
        }
    }

    /// Whether the caller caused the error (as opposed to the bridge or agent)
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::internal(err)
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
