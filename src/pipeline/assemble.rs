//! Construction of the task returned to the caller

use std::sync::Arc;

use crate::{
    pipeline::{
        dispatch::Dispatched,
        identity::{IdGenerator, SharedClock},
    },
    protocol::{
        message::{Message, Part, Role},
        task::{HistoryEntry, Task, TaskState, TaskStatus},
        Artifact, ObjectKind,
    },
};

/// Name of the artifact holding tool output
pub const TOOL_RESULTS_ARTIFACT: &str = "ToolResults";

/// Builds completed tasks from dispatched invocations
#[derive(Clone)]
pub struct TaskAssembler {
    ids: Arc<dyn IdGenerator>,
    clock: SharedClock,
}

impl TaskAssembler {
    pub fn new(ids: Arc<dyn IdGenerator>, clock: SharedClock) -> Self {
        Self { ids, clock }
    }

    /// Assemble the task for a finished invocation
    ///
    /// Caller-supplied ids are kept; every missing id is generated fresh.
    pub fn assemble(&self, dispatched: Dispatched) -> Task {
        let Dispatched {
            agent_id,
            context_id,
            task_id: requested_task_id,
            messages,
            generation,
            ..
        } = dispatched;

        let task_id = self.supplied_or_fresh(requested_task_id.as_deref());
        let context_id = self.supplied_or_fresh(context_id.as_deref());

        let mut artifacts = vec![Artifact {
            artifact_id: self.ids.generate(),
            name: format!("{agent_id}Response"),
            parts: vec![Part::text(generation.text.as_str())],
        }];
        if !generation.tool_results.is_empty() {
            artifacts.push(Artifact {
                artifact_id: self.ids.generate(),
                name: TOOL_RESULTS_ARTIFACT.to_string(),
                parts: generation.tool_results.into_iter().map(Part::data).collect(),
            });
        }

        let reply = HistoryEntry {
            kind: ObjectKind::Message,
            role: Role::Agent,
            parts: vec![Part::text(generation.text.as_str())],
            content: generation.text,
            message_id: self.ids.generate(),
            task_id: task_id.clone(),
        };

        let mut history: Vec<HistoryEntry> = messages
            .into_iter()
            .map(|message| self.history_entry(message, requested_task_id.as_deref()))
            .collect();
        history.push(reply.clone());

        Task {
            id: task_id,
            context_id,
            status: TaskStatus {
                state: TaskState::Completed,
                timestamp: self.clock.utc(),
                message: reply,
            },
            artifacts,
            history,
            kind: ObjectKind::Task,
        }
    }

    /// Record an input message, falling back to the request's task id and
    /// then to a fresh id of its own
    fn history_entry(&self, message: Message, requested_task_id: Option<&str>) -> HistoryEntry {
        let content = message.content();
        let message_id = self.supplied_or_fresh(message.message_id.as_deref());
        let task_id = match supplied(message.task_id.as_deref()).or(supplied(requested_task_id)) {
            Some(id) => id.to_string(),
            None => self.ids.generate(),
        };

        HistoryEntry {
            kind: ObjectKind::Message,
            role: message.role,
            parts: message.parts.unwrap_or_default(),
            content,
            message_id,
            task_id,
        }
    }

    fn supplied_or_fresh(&self, id: Option<&str>) -> String {
        match supplied(id) {
            Some(id) => id.to_string(),
            None => self.ids.generate(),
        }
    }
}

/// Caller ids that are empty strings count as absent
fn supplied(id: Option<&str>) -> Option<&str> {
    id.filter(|id| !id.is_empty())
}
