//! Core task bridge service implementation

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_service::Service;

use crate::{
    pipeline::{Dispatcher, TaskAssembler},
    protocol::error::BridgeError,
    service::{TaskRequest, TaskResponse},
};

/// Core service turning validated task requests into completed tasks
///
/// Each call is independent: the service holds no per-request state, so clones
/// can run calls fully in parallel.
#[derive(Clone)]
pub struct TaskBridgeService {
    dispatcher: Dispatcher,
    assembler: TaskAssembler,
}

impl TaskBridgeService {
    /// Create a new task bridge service
    ///
    /// # Arguments
    ///
    /// * `dispatcher` - Resolves and invokes agents
    /// * `assembler` - Builds the resulting tasks
    pub fn new(dispatcher: Dispatcher, assembler: TaskAssembler) -> Self {
        Self {
            dispatcher,
            assembler,
        }
    }
}

impl Service<TaskRequest> for TaskBridgeService {
    type Response = TaskResponse;
    type Error = BridgeError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        // No shared resources to wait on
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: TaskRequest) -> Self::Future {
        let dispatcher = self.dispatcher.clone();
        let assembler = self.assembler.clone();

        Box::pin(async move {
            let dispatched = dispatcher.dispatch(req).await?;
            let request_id = dispatched.request_id.clone();

            let task = assembler.assemble(dispatched);
            tracing::debug!(
                task_id = %task.id,
                artifacts = task.artifacts.len(),
                history = task.history.len(),
                "task completed"
            );

            Ok(TaskResponse::new(request_id, task))
        })
    }
}
