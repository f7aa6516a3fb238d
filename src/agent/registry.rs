//! Agent lookup

use std::{collections::HashMap, fmt, sync::Arc};

use super::Agent;

/// Resolves agent identifiers to invocable agents
pub trait AgentRegistry: Send + Sync {
    /// Look up an agent by id, `None` if no such agent is registered
    fn lookup(&self, agent_id: &str) -> Option<Arc<dyn Agent>>;
}

/// Registry backed by a fixed map of agents
#[derive(Clone, Default)]
pub struct InMemoryRegistry {
    agents: HashMap<String, Arc<dyn Agent>>,
}

impl InMemoryRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, replacing any previous agent with the same id
    pub fn register(&mut self, agent_id: impl Into<String>, agent: Arc<dyn Agent>) {
        self.agents.insert(agent_id.into(), agent);
    }

    /// Builder-style [`register`](Self::register)
    pub fn with_agent(mut self, agent_id: impl Into<String>, agent: Arc<dyn Agent>) -> Self {
        self.register(agent_id, agent);
        self
    }

    /// Ids of all registered agents, sorted
    pub fn agent_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl AgentRegistry for InMemoryRegistry {
    fn lookup(&self, agent_id: &str) -> Option<Arc<dyn Agent>> {
        self.agents.get(agent_id).cloned()
    }
}

impl fmt::Debug for InMemoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRegistry")
            .field("agents", &self.agent_ids())
            .finish()
    }
}
