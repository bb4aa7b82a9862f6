//! Port traits (hexagonal architecture).
//!
//! These traits define the interfaces between the admission gate and the
//! host scheduler. The gate can be exercised with synthetic implementations
//! with no live scheduler present.

use crate::Result;
use crate::config::BlockerConfig;
use crate::work::WorkSnapshot;
use async_trait::async_trait;

/// Store of per-job blocker configuration.
#[async_trait]
pub trait BlockerConfigStore: Send + Sync {
    /// Get the blocker config for a job, if one is configured.
    async fn config_for(&self, job_name: &str) -> Result<Option<BlockerConfig>>;
}

/// Provider of the live running/queued work snapshot.
///
/// Implementations capture under their own locking discipline; the
/// snapshot is not assumed valid after the call returns.
#[async_trait]
pub trait WorkSnapshotProvider: Send + Sync {
    /// Capture the current running and queued work across the fleet.
    async fn snapshot(&self) -> Result<WorkSnapshot>;
}
