//! Runs refresh callbacks on the tokio runtime and reports back over a channel

use std::sync::Arc;

use async_trait::async_trait;
use prayerboard_core::{prayer::PrayerData, PrayerStore, SnapshotCache};
use tokio::sync::mpsc;

use super::controller::{RefreshOutcome, RefreshRequest};

/// The work a refresh performs
#[async_trait]
pub trait RefreshSource: Send + Sync + 'static {
    type Output: Send + 'static;

    async fn refresh(&self) -> anyhow::Result<Self::Output>;
}

/// Settled refresh, matched to its request by `id`
#[derive(Debug)]
pub struct RefreshReport<T> {
    pub id: u64,
    pub result: anyhow::Result<T>,
}

impl<T> RefreshReport<T> {
    pub fn outcome(&self) -> RefreshOutcome {
        match &self.result {
            Ok(_) => RefreshOutcome::Success,
            Err(e) => RefreshOutcome::Failed(e.to_string()),
        }
    }
}

pub struct RefreshRunner<S: RefreshSource> {
    source: Arc<S>,
    tx: mpsc::UnboundedSender<RefreshReport<S::Output>>,
    rx: mpsc::UnboundedReceiver<RefreshReport<S::Output>>,
}

impl<S: RefreshSource> RefreshRunner<S> {
    pub fn new(source: Arc<S>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { source, tx, rx }
    }

    /// Run the source for `request` in the background.
    ///
    /// A report is always delivered, even when the task panics.
    pub fn spawn(&self, request: RefreshRequest) {
        let source = self.source.clone();
        let tx = self.tx.clone();
        let id = request.id;

        tokio::spawn(async move {
            let work = tokio::spawn(async move { source.refresh().await });
            let result = match work.await {
                Ok(result) => result,
                Err(e) => Err(anyhow::anyhow!("refresh task aborted: {}", e)),
            };
            let _ = tx.send(RefreshReport { id, result });
        });
    }

    /// Next settled refresh, without blocking
    pub fn try_recv(&mut self) -> Option<RefreshReport<S::Output>> {
        self.rx.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<RefreshReport<S::Output>> {
        self.rx.recv().await
    }
}

/// Fetch the latest published list, keeping the snapshot cache current
pub struct StoreRefresh {
    store: Arc<dyn PrayerStore>,
    cache: Option<SnapshotCache>,
}

impl StoreRefresh {
    pub fn new(store: Arc<dyn PrayerStore>, cache: Option<SnapshotCache>) -> Self {
        Self { store, cache }
    }
}

#[async_trait]
impl RefreshSource for StoreRefresh {
    type Output = Option<PrayerData>;

    async fn refresh(&self) -> anyhow::Result<Self::Output> {
        let latest = self.store.fetch_latest().await?;
        if let (Some(data), Some(cache)) = (&latest, &self.cache) {
            if let Err(e) = cache.save(data) {
                tracing::warn!(error = %e, "Failed to update snapshot cache");
            }
        }
        Ok(latest)
    }
}
