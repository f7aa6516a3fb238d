//! Core A2A protocol types and definitions

use serde::{Deserialize, Serialize};

pub mod error;
pub mod message;
pub mod task;

pub use error::{BridgeError, BridgeResult};
pub use message::{Message, Part, Role};
pub use task::{HistoryEntry, Task, TaskState, TaskStatus};

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artifact {
    /// Unique identifier of the Artifact
    #[serde(rename = "artifactId")]
    pub artifact_id: String,

    /// A human readable name for the Artifact
    pub name: String,

    /// Contents of the Artifact. Must contain at least one part
    pub parts: Vec<Part>,
}

/// Discriminator carried by A2A objects in their `kind` field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Message,
    Task,
}
