//! A2A task types and lifecycle states

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    message::{Part, Role},
    Artifact, ObjectKind,
};

/// A task in the A2A protocol
///
/// The bridge produces one task per request: the agent's reply and any tool
/// output as artifacts, plus the full conversation as history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Context ID grouping related tasks/messages
    #[serde(rename = "contextId")]
    pub context_id: String,

    /// Current status of the task
    pub status: TaskStatus,

    /// Outputs produced by the agent
    pub artifacts: Vec<Artifact>,

    /// Input messages in order, followed by the agent's reply
    pub history: Vec<HistoryEntry>,

    /// Always [`ObjectKind::Task`]
    pub kind: ObjectKind,
}

impl Task {
    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// The agent's reply, i.e. the last history entry
    pub fn reply(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }
}

/// Status block of a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Lifecycle state
    pub state: TaskState,

    /// When the status was assembled
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,

    /// Message accompanying the status
    pub message: HistoryEntry,
}

/// Task state in the A2A protocol lifecycle
///
/// Task lifecycle: submitted → working → completed/failed/cancelled/rejected
/// Non-terminal states: input-required, auth-required (awaiting client input)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the client
    InputRequired,

    /// Task requires authentication or authorization
    AuthRequired,

    /// Task completed successfully
    Completed,

    /// Task failed with an error
    Failed,

    /// Task was cancelled by the client
    Cancelled,

    /// Task was rejected by the agent (e.g., invalid request)
    Rejected,
}

impl TaskState {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Failed | TaskState::Cancelled | TaskState::Rejected
        )
    }

    /// Check if this state requires client action
    pub fn requires_action(&self) -> bool {
        matches!(self, TaskState::InputRequired | TaskState::AuthRequired)
    }
}

/// A message as recorded in a task's history or status
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Always [`ObjectKind::Message`]
    pub kind: ObjectKind,

    /// Role of the sender
    pub role: Role,

    /// Parts exactly as submitted or produced
    pub parts: Vec<Part>,

    /// Parts flattened into a single string
    pub content: String,

    /// Identifier of this entry
    #[serde(rename = "messageId")]
    pub message_id: String,

    /// Task the entry belongs to
    #[serde(rename = "taskId")]
    pub task_id: String,
}

/// Serde adapter writing timestamps as `2025-01-01T00:00:00.000Z`
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        DateTime::<Utc>::deserialize(deserializer)
    }
}
