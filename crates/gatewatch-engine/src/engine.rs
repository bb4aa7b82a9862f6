//! The blocking decision algorithm.

use crate::patterns::PatternSet;
use gatewatch_core::config::BlockerConfig;
use gatewatch_core::work::{WorkItem, WorkSnapshot};

/// Outcome of one admission check.
///
/// Constructed fresh per evaluation and never persisted; "wait and retry"
/// is the caller re-evaluating on its next tick.
#[derive(Debug, Clone)]
pub enum Verdict {
    /// Dispatch may proceed.
    Allow,
    /// Dispatch must be deferred; the named item holds the conflict.
    Blocked(WorkItem),
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked(_))
    }

    pub fn blocking_item(&self) -> Option<&WorkItem> {
        match self {
            Verdict::Blocked(item) => Some(item),
            Verdict::Allow => None,
        }
    }

    /// Human-readable deferral reason naming the blocker and its node.
    pub fn reason(&self) -> Option<String> {
        self.blocking_item()
            .map(|item| format!("blocked by {} on {}", item.display_name, item.node_label()))
    }
}

/// Decides whether existing work blocks a candidate's dispatch.
///
/// Stateless between calls: each evaluation is a pure function of its
/// inputs, so the engine is shared freely across dispatch attempts.
pub struct BlockEngine;

impl BlockEngine {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate one dispatch attempt against a fleet snapshot.
    ///
    /// The pool is iterated in snapshot order, running before queued, and
    /// the first item that is in scope and pattern-matched is returned.
    /// The candidate never blocks itself, whatever its name.
    pub fn evaluate(
        &self,
        candidate: &WorkItem,
        snapshot: &WorkSnapshot,
        config: &BlockerConfig,
        patterns: &PatternSet,
    ) -> Verdict {
        if !config.enabled {
            return Verdict::Allow;
        }
        if !config.scopes_anything() {
            return Verdict::Allow;
        }

        for item in snapshot.pool(config.scan_all_queue_item_states) {
            if item.id == candidate.id {
                continue;
            }
            if !self.in_scope(candidate, item, config) {
                continue;
            }
            if patterns.matches(&item.display_name) {
                return Verdict::Blocked(item.clone());
            }
        }

        Verdict::Allow
    }

    /// Scope filter: global blocking admits any node; node-level blocking
    /// requires the item to sit on the candidate's target node, where the
    /// controller context equals itself.
    fn in_scope(&self, candidate: &WorkItem, item: &WorkItem, config: &BlockerConfig) -> bool {
        if config.block_on_global_level {
            return true;
        }
        config.block_on_node_level && item.node == candidate.node
    }
}

impl Default for BlockEngine {
    fn default() -> Self {
        Self::new()
    }
}
