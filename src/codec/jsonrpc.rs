//! JSON-RPC 2.0 envelopes for the A2A task endpoint
//!
//! Requests are decoded leniently: any JSON body becomes a [`JsonRpcRequest`]
//! and judging its shape is left to the validation layer. Responses carry
//! either a task result or an error object.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::protocol::{error::BridgeError, task::Task};

/// The only protocol version the bridge accepts
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request envelope, exactly as received
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, expected to be `"2.0"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonrpc: Option<Value>,

    /// Request identifier, echoed in the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    /// Method name; the per-agent endpoint does not dispatch on it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Value>,

    /// Task parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build an envelope from an already decoded JSON value
    ///
    /// Non-object bodies yield an empty envelope, which then fails validation.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut obj) => Self {
                jsonrpc: obj.remove("jsonrpc"),
                id: obj.remove("id"),
                method: obj.remove("method"),
                params: obj.remove("params"),
            },
            _ => Self::default(),
        }
    }
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,

    pub id: Value,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Box<Task>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Successful response carrying a task
    pub fn success(id: Value, task: Task) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(Box::new(task)),
            error: None,
        }
    }

    /// Error response for a bridge failure
    pub fn failure(err: &BridgeError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: err.request_id(),
            result: None,
            error: Some(JsonRpcError::from(err)),
        }
    }
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl From<&BridgeError> for JsonRpcError {
    fn from(err: &BridgeError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
            data: err.data(),
        }
    }
}

/// JSON-RPC 2.0 codec for the task endpoint
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }

    /// Decode a request body
    ///
    /// Only bodies that are not JSON at all fail here.
    pub fn decode_request(&self, body: &[u8]) -> Result<JsonRpcRequest, BridgeError> {
        let value: Value = serde_json::from_slice(body)?;
        Ok(JsonRpcRequest::from_value(value))
    }

    /// Encode a response envelope
    pub fn encode_response(&self, response: &JsonRpcResponse) -> Result<Bytes, BridgeError> {
        let bytes = serde_json::to_vec(response)?;
        Ok(Bytes::from(bytes))
    }

    /// Content type of encoded responses
    pub fn content_type(&self) -> &str {
        "application/json"
    }
}
