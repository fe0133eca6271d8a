//! Retention sweeping: purges fixtures and synchronization records past
//! their configured age.

use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use tracing::info;

use crate::error::Result;
use crate::port::{FixtureStore, SyncRecordStore};

/// Age thresholds, in days, for the two purge targets.
#[derive(Debug, Clone, Copy)]
pub struct RetentionPolicy {
    pub fixture_days: i64,
    pub sync_days: i64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            fixture_days: 15,
            sync_days: 30,
        }
    }
}

/// Rows deleted by one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub fixtures_purged: usize,
    pub sync_records_purged: usize,
}

/// Deletes rows strictly older than the policy thresholds.
///
/// Deletion is keyed on the date column only, so a sweep never interferes
/// with an in-progress synchronization run for a newer date.
pub struct RetentionSweeper<F, S> {
    fixtures: Arc<F>,
    syncs: Arc<S>,
    policy: RetentionPolicy,
}

impl<F, S> RetentionSweeper<F, S>
where
    F: FixtureStore,
    S: SyncRecordStore,
{
    pub fn new(fixtures: Arc<F>, syncs: Arc<S>, policy: RetentionPolicy) -> Self {
        Self {
            fixtures,
            syncs,
            policy,
        }
    }

    /// Purge both targets relative to `today`.
    ///
    /// A row dated exactly at its threshold (e.g. fixtures 15 days old) is
    /// retained; only strictly older rows go.
    pub async fn sweep(&self, today: NaiveDate) -> Result<SweepReport> {
        let fixtures_purged = self
            .purge_fixtures_older_than(today - Duration::days(self.policy.fixture_days))
            .await?;
        let sync_records_purged = self
            .purge_sync_records_older_than(today - Duration::days(self.policy.sync_days))
            .await?;
        Ok(SweepReport {
            fixtures_purged,
            sync_records_purged,
        })
    }

    pub async fn purge_fixtures_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let purged = self.fixtures.purge_older_than(threshold).await?;
        info!(threshold = %threshold, purged, "fixtures purged");
        Ok(purged)
    }

    pub async fn purge_sync_records_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let purged = self.syncs.purge_older_than(threshold).await?;
        info!(threshold = %threshold, purged, "synchronization records purged");
        Ok(purged)
    }
}
