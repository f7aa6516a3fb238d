//! Bridge service response types

use serde_json::Value;

use crate::{codec::JsonRpcResponse, protocol::task::Task};

/// Successful outcome of a task request
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResponse {
    /// The caller's request id
    pub request_id: Value,

    /// The completed task
    pub task: Task,
}

impl TaskResponse {
    pub fn new(request_id: Value, task: Task) -> Self {
        Self { request_id, task }
    }

    /// Wrap the task in a JSON-RPC success envelope
    pub fn into_envelope(self) -> JsonRpcResponse {
        JsonRpcResponse::success(self.request_id, self.task)
    }
}
