// src/stats.rs
use crate::types::{ActionOutcome, ActionStats, RunStats};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared run statistics: the one piece of state virtual users touch
/// besides their own configuration.
#[derive(Clone)]
pub struct StatsCollector {
    inner: Arc<RwLock<RunStats>>,
}

impl Default for StatsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsCollector {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RunStats {
                per_action: HashMap::new(),
                started_at: Some(chrono::Utc::now()),
            })),
        }
    }

    /// Fold one completed action into the counters.
    pub async fn record(&self, outcome: &ActionOutcome) {
        let mut stats = self.inner.write().await;
        let entry = stats
            .per_action
            .entry(outcome.kind)
            .or_insert_with(ActionStats::default);
        entry.requests += 1;
        entry.total_latency += outcome.latency;
        if !outcome.success {
            entry.failures += 1;
        }
    }

    pub async fn snapshot(&self) -> RunStats {
        self.inner.read().await.clone()
    }

    pub async fn clear(&self) {
        let mut stats = self.inner.write().await;
        stats.per_action.clear();
        stats.started_at = Some(chrono::Utc::now());
    }
}
