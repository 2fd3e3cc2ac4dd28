// Refresher - Polls every resource on a fixed interval and publishes into view state
use crate::application::dashboard_source::{DashboardSource, FetchError};
use crate::domain::dashboard::{DashboardState, SlotUpdate};
use crate::domain::resource::Resource;
use futures::future::{join_all, try_join_all};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(30_000);

pub type SharedState = Arc<RwLock<DashboardState>>;

/// How a cycle publishes when only some resources could be loaded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePolicy {
    /// Any failure discards the whole cycle and every slot keeps its value
    #[default]
    AllOrNothing,
    /// Each resource is published on its own success
    PerSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Loading,
    Ready,
    Stopped,
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to fetch {resource}: {source}")]
    Fetch {
        resource: Resource,
        #[source]
        source: FetchError,
    },

    #[error("failed to decode {resource}: {source}")]
    Decode {
        resource: Resource,
        #[source]
        source: serde_json::Error,
    },
}

impl RefreshError {
    pub fn resource(&self) -> Resource {
        match self {
            RefreshError::Fetch { resource, .. } | RefreshError::Decode { resource, .. } => {
                *resource
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub updated: Vec<Resource>,
    pub failed: Vec<Resource>,
    pub elapsed: Duration,
}

/// One fetch-decode-publish pass over all resources
#[derive(Clone)]
struct RefreshCycle {
    source: Arc<dyn DashboardSource>,
    state: SharedState,
    policy: UpdatePolicy,
}

impl RefreshCycle {
    async fn run(&self) -> Result<CycleReport, RefreshError> {
        let started = Instant::now();

        let result = match self.policy {
            UpdatePolicy::AllOrNothing => self.publish_all_or_nothing().await,
            UpdatePolicy::PerSlot => Ok(self.publish_per_slot().await),
        };

        match result {
            Ok((updated, failed)) => {
                let report = CycleReport {
                    updated,
                    failed,
                    elapsed: started.elapsed(),
                };
                tracing::debug!(
                    "Refresh cycle finished in {:?}: {} updated, {} failed",
                    report.elapsed,
                    report.updated.len(),
                    report.failed.len()
                );
                Ok(report)
            }
            Err(e) => {
                tracing::error!(resource = %e.resource(), "Failed to fetch dashboard data: {}", e);
                Err(e)
            }
        }
    }

    async fn load(&self, resource: Resource) -> Result<SlotUpdate, RefreshError> {
        let body = self
            .source
            .fetch(resource)
            .await
            .map_err(|source| RefreshError::Fetch { resource, source })?;

        SlotUpdate::decode(resource, body).map_err(|source| RefreshError::Decode { resource, source })
    }

    async fn publish_all_or_nothing(
        &self,
    ) -> Result<(Vec<Resource>, Vec<Resource>), RefreshError> {
        // First failure drops the remaining requests and nothing is published
        let updates = try_join_all(Resource::ALL.into_iter().map(|r| self.load(r))).await?;

        let mut state = self.state.write().await;
        let updated = updates.iter().map(SlotUpdate::resource).collect();
        for update in updates {
            state.apply(update);
        }

        Ok((updated, Vec::new()))
    }

    async fn publish_per_slot(&self) -> (Vec<Resource>, Vec<Resource>) {
        let results = join_all(Resource::ALL.into_iter().map(|r| self.load(r))).await;

        let mut updated = Vec::new();
        let mut failed = Vec::new();
        let mut state = self.state.write().await;

        for (resource, result) in Resource::ALL.into_iter().zip(results) {
            match result {
                Ok(update) => {
                    state.apply(update);
                    updated.push(resource);
                }
                Err(e) => {
                    tracing::error!(resource = %e.resource(), "Failed to fetch dashboard data: {}", e);
                    failed.push(resource);
                }
            }
        }

        (updated, failed)
    }
}

#[derive(Default)]
struct Lifecycle {
    started: bool,
    stopped: bool,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

/// Owns the polling timer and the slot state it publishes into
pub struct Refresher {
    cycle: RefreshCycle,
    interval: Duration,
    lifecycle: Mutex<Lifecycle>,
}

impl Refresher {
    /// `interval` must be non-zero
    pub fn new(source: Arc<dyn DashboardSource>, interval: Duration, policy: UpdatePolicy) -> Self {
        Self {
            cycle: RefreshCycle {
                source,
                state: Arc::new(RwLock::new(DashboardState::new())),
                policy,
            },
            interval,
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    pub async fn snapshot(&self) -> DashboardState {
        self.cycle.state.read().await.clone()
    }

    pub fn policy(&self) -> UpdatePolicy {
        self.cycle.policy
    }

    pub async fn phase(&self) -> Phase {
        let (started, stopped) = {
            let lifecycle = self.lifecycle.lock().await;
            (lifecycle.started, lifecycle.stopped)
        };

        if stopped {
            Phase::Stopped
        } else if !started {
            Phase::Uninitialized
        } else if self.cycle.state.read().await.is_loading() {
            Phase::Loading
        } else {
            Phase::Ready
        }
    }

    /// Run one cycle immediately, then one every `interval`
    pub async fn start(&self) {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.started || lifecycle.stopped {
            tracing::warn!("Refresher already started, ignoring start()");
            return;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let cycle = self.cycle.clone();
        let interval = self.interval;

        lifecycle.task = Some(tokio::spawn(async move {
            refresh_loop(cycle, interval, shutdown_rx).await;
        }));
        lifecycle.shutdown = Some(shutdown_tx);
        lifecycle.started = true;

        tracing::info!(
            "Refresher started: every {:?}, policy {:?}",
            self.interval,
            self.cycle.policy
        );
    }

    /// Cancel the timer. Waits for an in-flight cycle to finish; no cycle
    /// starts once this returns.
    pub async fn stop(&self) {
        let (shutdown, task) = {
            let mut lifecycle = self.lifecycle.lock().await;
            lifecycle.stopped = true;
            (lifecycle.shutdown.take(), lifecycle.task.take())
        };

        if let Some(shutdown) = shutdown {
            let _ = shutdown.send(true);
        }

        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::error!("Refresh loop ended abnormally: {}", e);
            }
            tracing::info!("Refresher stopped");
        }
    }

    pub async fn refresh_once(&self) -> Result<CycleReport, RefreshError> {
        self.cycle.run().await
    }
}

async fn refresh_loop(
    cycle: RefreshCycle,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        // Errors are already logged by the cycle
        let _ = cycle.run().await;
    }
}
