//! Persistence ports for fixtures, synchronization records, and league
//! eligibility configuration.

use std::future::Future;

use chrono::NaiveDate;

use crate::domain::{Fixture, FixtureId, LeagueId, LeagueRecord, SyncId, SyncRecord};
use crate::error::Result;

/// Storage operations for fixtures.
pub trait FixtureStore: Send + Sync {
    /// Insert or update a fixture keyed by id.
    ///
    /// An existing fixture's prediction fields are refreshed; its grading
    /// state (`finished`, `actual`, `correct`) is never touched, which keeps
    /// same-date re-runs idempotent.
    fn upsert(&self, fixture: &Fixture) -> impl Future<Output = Result<()>> + Send;

    /// Get a fixture by ID.
    fn get(&self, id: &FixtureId) -> impl Future<Output = Result<Option<Fixture>>> + Send;

    /// List all fixtures whose kickoff falls on `date`.
    fn list_on(&self, date: NaiveDate) -> impl Future<Output = Result<Vec<Fixture>>> + Send;

    /// Persist a fixture's grading state (`finished`, `actual`, `correct`).
    fn record_result(&self, fixture: &Fixture) -> impl Future<Output = Result<()>> + Send;

    /// Delete fixtures dated strictly before `threshold`. Returns count
    /// deleted; a fixture dated exactly at the threshold is retained.
    fn purge_older_than(&self, threshold: NaiveDate)
        -> impl Future<Output = Result<usize>> + Send;
}

/// Storage operations for synchronization records.
pub trait SyncRecordStore: Send + Sync {
    /// Insert the in-flight record at run start.
    fn insert(&self, record: &SyncRecord) -> impl Future<Output = Result<()>> + Send;

    /// Write the record's final accounting at run end.
    fn finalize(&self, record: &SyncRecord) -> impl Future<Output = Result<()>> + Send;

    /// Get a record by ID.
    fn get(&self, id: &SyncId) -> impl Future<Output = Result<Option<SyncRecord>>> + Send;

    /// List records with a target date in `[from, to]`, oldest first.
    fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> impl Future<Output = Result<Vec<SyncRecord>>> + Send;

    /// Delete records with a target date strictly before `threshold`.
    fn purge_older_than(&self, threshold: NaiveDate)
        -> impl Future<Output = Result<usize>> + Send;
}

/// Storage operations for league eligibility configuration.
pub trait LeagueStore: Send + Sync {
    /// Insert or replace a league record.
    fn upsert(&self, record: &LeagueRecord) -> impl Future<Output = Result<()>> + Send;

    /// All known league records.
    fn all(&self) -> impl Future<Output = Result<Vec<LeagueRecord>>> + Send;

    /// Apply the external detection signal: flags the given leagues as
    /// detected without disturbing operator selection or blacklisting.
    fn mark_detected(&self, ids: &[LeagueId]) -> impl Future<Output = Result<()>> + Send;

    /// Operator selection toggle; `None` clears the selection.
    fn set_selected(
        &self,
        id: &LeagueId,
        selected: Option<bool>,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Operator blacklist toggle.
    fn set_blacklisted(
        &self,
        id: &LeagueId,
        blacklisted: bool,
    ) -> impl Future<Output = Result<()>> + Send;
}
