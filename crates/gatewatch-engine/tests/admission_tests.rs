//! End-to-end admission checks through the gate's port traits.

use async_trait::async_trait;
use gatewatch_core::Result;
use gatewatch_core::config::BlockerConfig;
use gatewatch_core::ports::{BlockerConfigStore, WorkSnapshotProvider};
use gatewatch_core::work::{WorkItem, WorkSnapshot, WorkState};
use gatewatch_engine::AdmissionGate;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

struct InMemoryConfigStore {
    configs: HashMap<String, BlockerConfig>,
}

#[async_trait]
impl BlockerConfigStore for InMemoryConfigStore {
    async fn config_for(&self, job_name: &str) -> Result<Option<BlockerConfig>> {
        Ok(self.configs.get(job_name).cloned())
    }
}

struct FixedSnapshotProvider {
    snapshot: Mutex<WorkSnapshot>,
}

#[async_trait]
impl WorkSnapshotProvider for FixedSnapshotProvider {
    async fn snapshot(&self) -> Result<WorkSnapshot> {
        Ok(self.snapshot.lock().unwrap().clone())
    }
}

fn gate_for(config: BlockerConfig, snapshot: WorkSnapshot) -> AdmissionGate {
    let mut configs = HashMap::new();
    configs.insert("deploy-staging".to_string(), config);
    AdmissionGate::new(
        Arc::new(InMemoryConfigStore { configs }),
        Arc::new(FixedSnapshotProvider {
            snapshot: Mutex::new(snapshot),
        }),
    )
}

fn deploy_config() -> BlockerConfig {
    BlockerConfig {
        enabled: true,
        blocking_patterns: "deploy-.*".to_string(),
        block_on_global_level: true,
        block_on_node_level: false,
        scan_all_queue_item_states: false,
    }
}

#[tokio::test]
async fn running_match_on_another_node_defers_dispatch() {
    let snapshot = WorkSnapshot {
        running: vec![WorkItem::new("deploy-prod", WorkState::Running).on_node("agent-2")],
        queued: vec![],
    };
    let gate = gate_for(deploy_config(), snapshot);

    let candidate = WorkItem::new("deploy-staging", WorkState::Buildable).on_node("agent-1");
    let verdict = gate.check("deploy-staging", &candidate).await.unwrap();

    assert!(verdict.is_blocked());
    assert_eq!(
        verdict.blocking_item().map(|i| i.display_name.as_str()),
        Some("deploy-prod")
    );
    assert_eq!(
        verdict.reason().as_deref(),
        Some("blocked by deploy-prod on agent-2")
    );
}

#[tokio::test]
async fn queued_match_does_not_defer_without_state_scanning() {
    let snapshot = WorkSnapshot {
        running: vec![],
        queued: vec![WorkItem::new("deploy-prod", WorkState::Waiting).on_node("agent-2")],
    };
    let gate = gate_for(deploy_config(), snapshot);

    let candidate = WorkItem::new("deploy-staging", WorkState::Buildable).on_node("agent-1");
    let verdict = gate.check("deploy-staging", &candidate).await.unwrap();

    assert!(!verdict.is_blocked());
}

#[tokio::test]
async fn repeated_checks_name_the_same_blocker() {
    let snapshot = WorkSnapshot {
        running: vec![
            WorkItem::new("deploy-alpha", WorkState::Running).on_node("agent-2"),
            WorkItem::new("deploy-beta", WorkState::Running).on_node("agent-3"),
        ],
        queued: vec![],
    };
    let gate = gate_for(deploy_config(), snapshot);
    let candidate = WorkItem::new("deploy-staging", WorkState::Buildable).on_node("agent-1");

    for _ in 0..5 {
        let verdict = gate.check("deploy-staging", &candidate).await.unwrap();
        assert_eq!(
            verdict.blocking_item().map(|i| i.display_name.as_str()),
            Some("deploy-alpha")
        );
    }
}

#[tokio::test]
async fn pattern_typo_saved_past_validation_fails_open() {
    let config = BlockerConfig {
        blocking_patterns: "[deploy".to_string(),
        ..deploy_config()
    };
    let snapshot = WorkSnapshot {
        running: vec![WorkItem::new("deploy-prod", WorkState::Running).on_node("agent-2")],
        queued: vec![],
    };
    let gate = gate_for(config, snapshot);

    let candidate = WorkItem::new("deploy-staging", WorkState::Buildable).on_node("agent-1");
    let verdict = gate.check("deploy-staging", &candidate).await.unwrap();

    assert!(!verdict.is_blocked());
}
