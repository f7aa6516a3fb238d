//! HTTP binding of the task bridge
//!
//! Exposes one endpoint per agent, `POST /a2a/agent/{agent_id}`. The body is a
//! JSON-RPC envelope; the response is either a task result or a JSON-RPC
//! error, with the HTTP status taken from the error.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tower_service::Service;

use crate::{
    codec::{JsonRpcCodec, JsonRpcResponse},
    protocol::error::BridgeError,
    service::{BridgeRequest, TaskResponse},
};

/// Route path of the per-agent task endpoint
pub const TASK_ROUTE: &str = "/a2a/agent/{agent_id}";

/// Build the router serving the task endpoint
pub fn router<S>(bridge: S) -> Router
where
    S: Service<BridgeRequest, Response = TaskResponse, Error = BridgeError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    Router::new()
        .route(TASK_ROUTE, post(handle_task::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(bridge)
}

async fn handle_task<S>(
    State(bridge): State<S>,
    Path(agent_id): Path<String>,
    body: Bytes,
) -> Response
where
    S: Service<BridgeRequest, Response = TaskResponse, Error = BridgeError>
        + Clone
        + Send
        + Sync
        + 'static,
    S::Future: Send + 'static,
{
    let codec = JsonRpcCodec::new();

    let outcome = match codec.decode_request(&body) {
        Ok(envelope) => {
            bridge
                .oneshot(BridgeRequest::new(agent_id.as_str(), envelope))
                .await
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(response) => reply(&codec, StatusCode::OK, &response.into_envelope()),
        Err(e) => {
            log_error(&agent_id, &e);
            let status =
                StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            reply(&codec, status, &JsonRpcResponse::failure(&e))
        }
    }
}

fn reply(codec: &JsonRpcCodec, status: StatusCode, envelope: &JsonRpcResponse) -> Response {
    match codec.encode_response(envelope) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, codec.content_type().to_string())],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = ?e, "failed to encode response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn log_error(agent_id: &str, err: &BridgeError) {
    match err {
        BridgeError::Internal(source) => {
            tracing::error!(agent_id, error = %format!("{source:#}"), "A2A route error");
        }
        BridgeError::InvocationTimeout { timeout, .. } => {
            tracing::error!(agent_id, ?timeout, "agent invocation timed out");
        }
        _ => tracing::warn!(agent_id, code = err.code(), "rejected task request: {err}"),
    }
}
