//! Builder for assembling a task bridge with its layers

use std::{sync::Arc, time::Duration};

use tower::ServiceBuilder;

use crate::{
    agent::AgentRegistry,
    layer::{EnvelopeValidationLayer, EnvelopeValidationService},
    pipeline::{
        DefaultClock, Dispatcher, IdGenerator, SharedClock, TaskAssembler, UuidV7Generator,
    },
    service::{BridgeConfig, TaskBridgeService},
};

/// The full bridge stack: envelope validation in front of [`TaskBridgeService`]
pub type TaskBridge = EnvelopeValidationService<TaskBridgeService>;

/// Builder for constructing task bridges
///
/// # Example
///
/// ```rust
/// use std::{sync::Arc, time::Duration};
/// use a2a_bridge::prelude::*;
///
/// let registry = InMemoryRegistry::new().with_agent("echoAgent", Arc::new(EchoAgent::new()));
/// let bridge = TaskBridgeBuilder::new(Arc::new(registry))
///     .with_invocation_timeout(Duration::from_secs(10))
///     .build();
/// # let _ = bridge;
/// ```
pub struct TaskBridgeBuilder {
    registry: Arc<dyn AgentRegistry>,
    config: BridgeConfig,
    ids: Arc<dyn IdGenerator>,
    clock: SharedClock,
}

impl TaskBridgeBuilder {
    /// Start building a bridge over the given registry
    pub fn new(registry: Arc<dyn AgentRegistry>) -> Self {
        Self {
            registry,
            config: BridgeConfig::default(),
            ids: Arc::new(UuidV7Generator),
            clock: Arc::new(DefaultClock),
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: BridgeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the agent invocation timeout
    pub fn with_invocation_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_invocation_timeout(timeout);
        self
    }

    /// Wait for agents indefinitely
    pub fn without_invocation_timeout(mut self) -> Self {
        self.config = self.config.without_invocation_timeout();
        self
    }

    /// Use a custom identifier source
    pub fn with_id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    /// Use a custom clock
    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Build the inner service without the validation layer
    pub fn build_service(self) -> TaskBridgeService {
        TaskBridgeService::new(
            Dispatcher::new(self.registry, self.config.invocation_timeout),
            TaskAssembler::new(self.ids, self.clock),
        )
    }

    /// Build the complete bridge
    pub fn build(self) -> TaskBridge {
        ServiceBuilder::new()
            .layer(EnvelopeValidationLayer::new())
            .service(self.build_service())
    }
}
