//! Dispatcher-side admission gate.
//!
//! The scheduler's dispatch loop consults [`AdmissionGate::check`] before
//! starting each candidate; on a blocked verdict the caller simply does not
//! dispatch and re-checks on its next tick.

use crate::engine::{BlockEngine, Verdict};
use crate::patterns::PatternSet;
use gatewatch_core::Result;
use gatewatch_core::config::BlockerConfig;
use gatewatch_core::ports::{BlockerConfigStore, WorkSnapshotProvider};
use gatewatch_core::work::WorkItem;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Compiled patterns for one job, keyed by the text they were built from.
struct CachedPatterns {
    raw_text: String,
    patterns: Arc<PatternSet>,
}

/// The admission gate consulted on every dispatch attempt.
///
/// Holds no lock across evaluations; concurrent checks may consult
/// overlapping snapshots and the losers are re-checked on the next tick.
pub struct AdmissionGate {
    configs: Arc<dyn BlockerConfigStore>,
    snapshots: Arc<dyn WorkSnapshotProvider>,
    engine: BlockEngine,
    compiled: RwLock<HashMap<String, CachedPatterns>>,
}

impl AdmissionGate {
    pub fn new(
        configs: Arc<dyn BlockerConfigStore>,
        snapshots: Arc<dyn WorkSnapshotProvider>,
    ) -> Self {
        Self {
            configs,
            snapshots,
            engine: BlockEngine::new(),
            compiled: RwLock::new(HashMap::new()),
        }
    }

    /// Decide whether a candidate may dispatch now.
    ///
    /// A job with no blocker config, or a disabled one, is admitted without
    /// capturing a snapshot. Config edits are picked up here: the cached
    /// pattern set is rebuilt whenever the job's pattern text changes.
    pub async fn check(&self, job_name: &str, candidate: &WorkItem) -> Result<Verdict> {
        let Some(config) = self.configs.config_for(job_name).await? else {
            return Ok(Verdict::Allow);
        };
        if !config.enabled {
            return Ok(Verdict::Allow);
        }

        let patterns = self.compiled_patterns(job_name, &config).await;
        let snapshot = self.snapshots.snapshot().await?;
        let verdict = self
            .engine
            .evaluate(candidate, &snapshot, &config, &patterns);

        if let Some(reason) = verdict.reason() {
            debug!(candidate = %candidate.display_name, %reason, "deferring dispatch");
        }

        Ok(verdict)
    }

    async fn compiled_patterns(&self, job_name: &str, config: &BlockerConfig) -> Arc<PatternSet> {
        {
            let cache = self.compiled.read().await;
            if let Some(entry) = cache.get(job_name)
                && entry.raw_text == config.blocking_patterns
            {
                return Arc::clone(&entry.patterns);
            }
        }

        let patterns = Arc::new(PatternSet::compile(&config.blocking_patterns));
        let mut cache = self.compiled.write().await;
        cache.insert(
            job_name.to_string(),
            CachedPatterns {
                raw_text: config.blocking_patterns.clone(),
                patterns: Arc::clone(&patterns),
            },
        );
        patterns
    }
}
