//! Per-job blocker configuration.

use serde::{Deserialize, Serialize};

/// Admission gate configuration attached to one job.
///
/// Owned and persisted by the host's configuration store; the engine reads
/// one consistent value per evaluation and never mutates it. A freshly
/// created job has the blocker disabled with no patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockerConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Newline-delimited blocking-name expressions, insertion order
    /// preserved. Blank lines are ignored.
    #[serde(default)]
    pub blocking_patterns: String,
    /// Block when a matching item occupies the candidate's target node.
    #[serde(default)]
    pub block_on_node_level: bool,
    /// Block when a matching item runs anywhere in the fleet.
    #[serde(default)]
    pub block_on_global_level: bool,
    /// Also check queued-but-not-yet-running items.
    #[serde(default)]
    pub scan_all_queue_item_states: bool,
}

impl BlockerConfig {
    /// With both scope flags off, nothing can ever block.
    pub fn scopes_anything(&self) -> bool {
        self.block_on_node_level || self.block_on_global_level
    }
}
