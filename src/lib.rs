// src/lib.rs
pub mod client;
pub mod error;
pub mod identity;
pub mod request;
pub mod selection;
pub mod stats;
pub mod types;
pub mod user;

pub use crate::client::ActionClient;
pub use crate::error::{LoadgenError, LoadgenResult};
pub use crate::identity::IdentitySource;
pub use crate::stats::StatsCollector;
pub use crate::types::*;
pub use crate::user::VirtualUser;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

/// Drives a population of virtual users against one target service.
#[derive(Clone)]
pub struct LoadGenerator {
    client: ActionClient,
    config: UserConfig,
    stats: StatsCollector,
    shutdown_tx: watch::Sender<bool>,
    handles: Arc<RwLock<HashMap<Uuid, JoinHandle<LoadgenResult<()>>>>>,
}

impl LoadGenerator {
    /// Create a new generator. Every spawned user gets a clone of `config`;
    /// the target base URL comes from the caller, not from this crate.
    pub fn new(base_url: impl Into<String>, config: UserConfig) -> LoadgenResult<Self> {
        let client = ActionClient::new(base_url)?;
        config.identity.validate()?;
        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            client,
            config,
            stats: StatsCollector::new(),
            shutdown_tx,
            handles: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// Start `count` virtual users as independent tokio tasks.
    pub async fn spawn_users(&self, count: usize) -> LoadgenResult<Vec<Uuid>> {
        if *self.shutdown_tx.borrow() {
            return Err(LoadgenError::AlreadyStopped);
        }

        let mut ids = Vec::with_capacity(count);
        let mut handles = self.handles.write().await;

        for _ in 0..count {
            let user = VirtualUser::new(
                self.config.clone(),
                self.client.clone(),
                self.stats.clone(),
            )?;
            let id = user.id();
            let handle = tokio::spawn(user.run(self.shutdown_tx.subscribe()));
            handles.insert(id, handle);
            ids.push(id);
        }

        info!(count, "spawned virtual users");
        Ok(ids)
    }

    /// Let the spawned users run for `duration`, then stop them and return
    /// the collected statistics.
    pub async fn run_for(&self, duration: Duration) -> LoadgenResult<RunStats> {
        tokio::time::sleep(duration).await;
        self.shutdown().await?;
        Ok(self.stats().await)
    }

    /// Signal every user to stop and wait for their loops to finish.
    pub async fn shutdown(&self) -> LoadgenResult<()> {
        self.shutdown_tx.send_replace(true);

        let mut handles = self.handles.write().await;
        for (id, handle) in handles.drain() {
            handle
                .await
                .map_err(|e| LoadgenError::InternalError(format!("user {id} panicked: {e}")))??;
        }
        Ok(())
    }

    /// Snapshot of the run statistics so far.
    pub async fn stats(&self) -> RunStats {
        self.stats.snapshot().await
    }

    /// Number of users currently running.
    pub async fn user_count(&self) -> usize {
        self.handles.read().await.len()
    }
}
