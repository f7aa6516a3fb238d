//! Validation layer for JSON-RPC task envelopes

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use serde_json::Value;
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    codec::JSONRPC_VERSION,
    protocol::error::BridgeError,
    service::{BridgeRequest, TaskRequest, TaskResponse},
};

/// Check the envelope and turn it into a [`TaskRequest`]
///
/// The protocol version must be exactly `"2.0"` and the request id must be
/// present and non-null.
///
/// # Errors
///
/// [`BridgeError::InvalidRequest`] echoing whatever id was supplied.
pub fn validate_envelope(req: BridgeRequest) -> Result<TaskRequest, BridgeError> {
    let BridgeRequest { agent_id, envelope } = req;

    let version_ok = envelope.jsonrpc.as_ref().and_then(Value::as_str) == Some(JSONRPC_VERSION);
    let request_id = envelope.id.filter(|id| !id.is_null());

    match request_id {
        Some(request_id) if version_ok => Ok(TaskRequest {
            request_id,
            agent_id,
            params: envelope.params,
        }),
        id => Err(BridgeError::InvalidRequest { id }),
    }
}

/// Layer that validates task envelopes before they reach the bridge
#[derive(Clone, Debug, Default)]
pub struct EnvelopeValidationLayer;

impl EnvelopeValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for EnvelopeValidationLayer {
    type Service = EnvelopeValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        EnvelopeValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone, Debug)]
pub struct EnvelopeValidationService<S> {
    inner: S,
}

impl<S> Service<BridgeRequest> for EnvelopeValidationService<S>
where
    S: Service<TaskRequest, Response = TaskResponse, Error = BridgeError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = TaskResponse;
    type Error = BridgeError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: BridgeRequest) -> Self::Future {
        let task_request = match validate_envelope(req) {
            Ok(task_request) => task_request,
            Err(e) => return Box::pin(async move { Err(e) }),
        };

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(task_request).await })
    }
}
