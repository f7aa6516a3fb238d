//! Tower Service implementations

pub mod builder;
pub mod config;
pub mod core;
pub mod request;
pub mod response;

pub use builder::{TaskBridge, TaskBridgeBuilder};
pub use config::BridgeConfig;
pub use self::core::TaskBridgeService;
pub use request::{BridgeRequest, TaskParams, TaskRequest};
pub use response::TaskResponse;
