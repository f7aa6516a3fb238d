//! # A2A Bridge
//!
//! A Tower-based bridge between the Agent2Agent (A2A) JSON-RPC task protocol
//! and conversational agents.
//!
//! A client posts a JSON-RPC envelope naming a target agent. The bridge
//! validates it, flattens the A2A messages into plain `{role, content}` pairs,
//! invokes the agent and waits for its complete reply, then answers with a
//! completed A2A task carrying artifacts and the conversation history.
//!
//! ## Features
//!
//! - **Composable**: validation is a Tower layer in front of the core service
//! - **Stateless**: every request is handled independently
//! - **Protocol errors**: every failure maps to a JSON-RPC error envelope
//! - **Deterministic when needed**: id and clock sources are injectable
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use a2a_bridge::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = InMemoryRegistry::new().with_agent("echoAgent", Arc::new(EchoAgent::new()));
//!     let bridge = TaskBridgeBuilder::new(Arc::new(registry)).build();
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:4111").await?;
//!     axum::serve(listener, a2a_bridge::server::router(bridge)).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod codec;
pub mod layer;
pub mod pipeline;
pub mod protocol;
pub mod server;
pub mod service;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        agent::{Agent, AgentMessage, AgentRegistry, EchoAgent, Generation, InMemoryRegistry},
        protocol::error::BridgeError,
        protocol::{Message, Part, Role, Task, TaskState},
        service::{BridgeConfig, TaskBridge, TaskBridgeBuilder},
    };
}
