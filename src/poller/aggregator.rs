// src/poller/aggregator.rs
use std::sync::Arc;
use log::error;
use tokio::task::JoinSet;
use crate::storage::memory::{MergeOutcome, ServerStore};
use super::discovery::Target;
use super::fetcher::StatusFetcher;

/// How each target of a cycle ended up.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub targets: usize,
    pub failed: usize,
    pub empty: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub discarded: usize,
}

enum TargetOutcome {
    Failed,
    Empty,
    Merged(MergeOutcome),
}

pub struct Aggregator {
    fetcher: StatusFetcher,
    store: Arc<ServerStore>,
}

impl Aggregator {
    pub fn new(fetcher: StatusFetcher, store: Arc<ServerStore>) -> Self {
        Self { fetcher, store }
    }

    /// Queries every target concurrently and merges the populated servers.
    /// Returns once all spawned queries have finished.
    pub async fn collect(&self, targets: Vec<Target>) -> CycleReport {
        let mut report = CycleReport {
            targets: targets.len(),
            ..Default::default()
        };

        let mut tasks = JoinSet::new();
        for target in targets {
            let fetcher = self.fetcher.clone();
            let store = Arc::clone(&self.store);
            tasks.spawn(async move {
                match fetcher.fetch(&target).await {
                    Err(_) => TargetOutcome::Failed,
                    Ok(snapshot) if !snapshot.is_populated() => TargetOutcome::Empty,
                    Ok(snapshot) => TargetOutcome::Merged(store.merge(snapshot)),
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(TargetOutcome::Failed) => report.failed += 1,
                Ok(TargetOutcome::Empty) => report.empty += 1,
                Ok(TargetOutcome::Merged(MergeOutcome::Inserted)) => report.inserted += 1,
                Ok(TargetOutcome::Merged(MergeOutcome::Replaced)) => report.replaced += 1,
                Ok(TargetOutcome::Merged(MergeOutcome::Discarded)) => report.discarded += 1,
                Err(e) => {
                    error!("Status task did not complete: {}", e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}
