// src/poller/scheduler.rs
use std::sync::Arc;
use std::time::Duration;
use log::{error, info};
use crate::storage::memory::ServerStore;
use super::aggregator::{Aggregator, CycleReport};
use super::discovery::{DiscoveryError, TargetSource};

/// Drives discovery and collection on a fixed interval.
pub struct Scheduler {
    listing: Arc<dyn TargetSource>,
    aggregator: Aggregator,
    store: Arc<ServerStore>,
    interval: Duration,
}

impl Scheduler {
    pub fn new(
        listing: Arc<dyn TargetSource>,
        aggregator: Aggregator,
        store: Arc<ServerStore>,
        interval: Duration,
    ) -> Self {
        Self {
            listing,
            aggregator,
            store,
            interval,
        }
    }

    /// One discovery + fetch + merge pass. A listing failure aborts the
    /// pass before anything is queried.
    pub async fn run_cycle(&self) -> Result<CycleReport, DiscoveryError> {
        let targets = self.listing.targets().await?;
        Ok(self.aggregator.collect(targets).await)
    }

    pub async fn run(self) {
        loop {
            match self.run_cycle().await {
                Ok(report) => info!(
                    "Server info updated: {} targets, {} failed, {} empty, {} new, {} replaced, {} already known; {} servers stored",
                    report.targets,
                    report.failed,
                    report.empty,
                    report.inserted,
                    report.replaced,
                    report.discarded,
                    self.store.len()
                ),
                Err(e) => error!("Discovery failed, retrying in {:?}: {}", self.interval, e),
            }
            tokio::time::sleep(self.interval).await;
        }
    }
}
