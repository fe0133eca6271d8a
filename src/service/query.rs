//! Read-only lookups consumed by the routing layer.
//!
//! The core performs no request parsing or response formatting; these are
//! the pure query functions behind the inbound HTTP surface.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Fixture, FixtureId, LeagueRecord, SyncRecord};
use crate::error::Result;
use crate::port::{FixtureStore, LeagueStore, SyncRecordStore};
use crate::service::accuracy::AccuracyEvaluator;

pub struct QueryService<F, S, L> {
    fixtures: Arc<F>,
    syncs: Arc<S>,
    leagues: Arc<L>,
    accuracy: AccuracyEvaluator<F>,
}

impl<F, S, L> QueryService<F, S, L>
where
    F: FixtureStore,
    S: SyncRecordStore,
    L: LeagueStore,
{
    pub fn new(fixtures: Arc<F>, syncs: Arc<S>, leagues: Arc<L>) -> Self {
        let accuracy = AccuracyEvaluator::new(Arc::clone(&fixtures));
        Self {
            fixtures,
            syncs,
            leagues,
            accuracy,
        }
    }

    pub async fn fixtures_on(&self, date: NaiveDate) -> Result<Vec<Fixture>> {
        self.fixtures.list_on(date).await
    }

    pub async fn fixture(&self, id: &FixtureId) -> Result<Option<Fixture>> {
        self.fixtures.get(id).await
    }

    pub async fn sync_records_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SyncRecord>> {
        self.syncs.list_between(from, to).await
    }

    /// `None` when no fixture on `date` has been graded yet.
    pub async fn accuracy_for(&self, date: NaiveDate) -> Result<Option<f64>> {
        self.accuracy.accuracy_for(date).await
    }

    pub async fn blacklisted_leagues(&self) -> Result<Vec<LeagueRecord>> {
        let mut records = self.leagues.all().await?;
        records.retain(|record| record.blacklisted);
        Ok(records)
    }
}
