use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, MissedTickBehavior};

use super::dataset;
use crate::core::error::Result;
use crate::features::hospitals::models::Hospital;

/// Live hospital listing, usually the database
#[async_trait]
pub trait HospitalSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Hospital>>;
}

/// Hospitals currently served to the locator
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub hospitals: Vec<Hospital>,
    pub warning: Option<String>,
    /// Generation of the last applied refresh, 0 before the first one
    pub generation: u64,
    pub refreshed_at: Option<DateTime<Utc>>,
}

/// Periodically merges the live listing over the static baseline
pub struct HospitalFeed {
    source: Arc<dyn HospitalSource>,
    baseline: Vec<Hospital>,
    snapshot: Arc<RwLock<FeedSnapshot>>,
    issued: AtomicU64,
    poll_interval: Duration,
}

impl HospitalFeed {
    pub fn new(
        source: Arc<dyn HospitalSource>,
        baseline: Vec<Hospital>,
        poll_interval: Duration,
    ) -> Self {
        let snapshot = FeedSnapshot {
            hospitals: dataset::merge(&baseline, &[]),
            ..Default::default()
        };

        Self {
            source,
            baseline,
            snapshot: Arc::new(RwLock::new(snapshot)),
            issued: AtomicU64::new(0),
            poll_interval,
        }
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetch once and apply the result unless a newer refresh already landed.
    /// Returns whether the result was applied.
    pub async fn refresh(&self) -> bool {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.source.fetch_all().await;
        self.apply(generation, result).await
    }

    async fn apply(&self, generation: u64, result: Result<Vec<Hospital>>) -> bool {
        let mut snapshot = self.snapshot.write().await;

        if generation <= snapshot.generation {
            tracing::debug!(
                "Dropping stale hospital refresh {} (applied: {})",
                generation,
                snapshot.generation
            );
            return false;
        }

        if let Err(e) = &result {
            tracing::warn!("Failed to refresh hospital listing, serving local data: {}", e);
        }

        let outcome = dataset::load(&self.baseline, result);
        tracing::debug!(
            "Hospital feed refreshed: {} visible hospitals (generation {})",
            outcome.hospitals.len(),
            generation
        );
        snapshot.hospitals = outcome.hospitals;
        snapshot.warning = outcome.warning;

        snapshot.generation = generation;
        snapshot.refreshed_at = Some(Utc::now());
        true
    }

    /// Initial load, then one spawned refresh per interval tick
    pub async fn run(self: Arc<Self>) {
        tracing::info!(
            "Starting hospital feed (poll every {}s)",
            self.poll_interval.as_secs()
        );

        self.refresh().await;

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let feed = Arc::clone(&self);
            tokio::spawn(async move {
                feed.refresh().await;
            });
        }
    }
}

#[cfg(test)]
pub(crate) mod stub {
    use super::*;
    use crate::core::error::AppError;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Source returning queued results, then repeating the last one
    pub struct StubSource {
        results: Mutex<VecDeque<Result<Vec<Hospital>>>>,
        fallback: Vec<Hospital>,
    }

    impl StubSource {
        pub fn new(results: Vec<Result<Vec<Hospital>>>) -> Self {
            Self {
                results: Mutex::new(results.into()),
                fallback: Vec::new(),
            }
        }

        pub fn always(hospitals: Vec<Hospital>) -> Self {
            Self {
                results: Mutex::new(VecDeque::new()),
                fallback: hospitals,
            }
        }

        pub fn failing() -> Self {
            Self::new(vec![Err(AppError::Internal("connection refused".into()))])
        }
    }

    #[async_trait]
    impl HospitalSource for StubSource {
        async fn fetch_all(&self) -> Result<Vec<Hospital>> {
            let next = self.results.lock().unwrap().pop_front();
            match next {
                Some(result) => result,
                None => Ok(self.fallback.clone()),
            }
        }
    }
}
