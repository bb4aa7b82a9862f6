//! Work item and fleet snapshot types.

use crate::ids::WorkItemId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal projection of a scheduler unit of work.
///
/// `node` is the execution node the item occupies or requests; `None` is
/// the controller context and compares equal to any other `None`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: WorkItemId,
    pub display_name: String,
    #[serde(default)]
    pub node: Option<String>,
    pub state: WorkState,
    pub queued_at: DateTime<Utc>,
}

impl WorkItem {
    pub fn new(display_name: impl Into<String>, state: WorkState) -> Self {
        Self {
            id: WorkItemId::new(),
            display_name: display_name.into(),
            node: None,
            state,
            queued_at: Utc::now(),
        }
    }

    /// Pin the item to a named execution node.
    pub fn on_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    /// Node name for diagnostics; the controller context has no name of
    /// its own.
    pub fn node_label(&self) -> &str {
        self.node.as_deref().unwrap_or("controller")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkState {
    Waiting,
    Buildable,
    Running,
}

impl WorkState {
    pub fn is_running(&self) -> bool {
        matches!(self, WorkState::Running)
    }
}

/// Point-in-time view of all work across the fleet, captured by the
/// caller at the moment of a dispatch attempt.
///
/// Vector order is the declared iteration order for conflict checks, so
/// repeated evaluations of the same snapshot name the same blocker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkSnapshot {
    #[serde(default)]
    pub running: Vec<WorkItem>,
    #[serde(default)]
    pub queued: Vec<WorkItem>,
}

impl WorkSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.running.is_empty() && self.queued.is_empty()
    }

    /// Items to check a candidate against: running first, then queued if
    /// requested, each in capture order.
    pub fn pool(&self, include_queued: bool) -> impl Iterator<Item = &WorkItem> {
        let queued: &[WorkItem] = if include_queued { &self.queued } else { &[] };
        self.running.iter().chain(queued.iter())
    }
}
