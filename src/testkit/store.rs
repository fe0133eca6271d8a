//! In-memory store implementation for testing.

use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::{Fixture, FixtureId, LeagueId, LeagueRecord, SyncId, SyncRecord};
use crate::error::Result;
use crate::port::{FixtureStore, LeagueStore, SyncRecordStore};

/// In-memory store implementing every storage port, with the same upsert
/// and purge semantics as the SQLite adapter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    fixtures: RwLock<HashMap<FixtureId, Fixture>>,
    syncs: RwLock<HashMap<SyncId, SyncRecord>>,
    leagues: RwLock<HashMap<LeagueId, LeagueRecord>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl FixtureStore for MemoryStore {
    async fn upsert(&self, fixture: &Fixture) -> Result<()> {
        let mut fixtures = self.fixtures.write();
        match fixtures.get_mut(&fixture.id) {
            Some(existing) => {
                // Grading state outlives re-runs.
                existing.kickoff = fixture.kickoff;
                existing.home = fixture.home.clone();
                existing.away = fixture.away.clone();
                existing.league = fixture.league.clone();
                existing.predicted = fixture.predicted;
                existing.confidence = fixture.confidence;
            }
            None => {
                fixtures.insert(fixture.id.clone(), fixture.clone());
            }
        }
        Ok(())
    }

    async fn get(&self, id: &FixtureId) -> Result<Option<Fixture>> {
        Ok(self.fixtures.read().get(id).cloned())
    }

    async fn list_on(&self, date: NaiveDate) -> Result<Vec<Fixture>> {
        let mut listed: Vec<Fixture> = self
            .fixtures
            .read()
            .values()
            .filter(|f| f.day() == date)
            .cloned()
            .collect();
        listed.sort_by_key(|f| f.kickoff);
        Ok(listed)
    }

    async fn record_result(&self, fixture: &Fixture) -> Result<()> {
        if let Some(existing) = self.fixtures.write().get_mut(&fixture.id) {
            existing.finished = fixture.finished;
            existing.actual = fixture.actual;
            existing.correct = fixture.correct;
        }
        Ok(())
    }

    async fn purge_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let mut fixtures = self.fixtures.write();
        let before = fixtures.len();
        fixtures.retain(|_, f| f.day() >= threshold);
        Ok(before - fixtures.len())
    }
}

impl SyncRecordStore for MemoryStore {
    async fn insert(&self, record: &SyncRecord) -> Result<()> {
        self.syncs.write().insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn finalize(&self, record: &SyncRecord) -> Result<()> {
        self.syncs.write().insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &SyncId) -> Result<Option<SyncRecord>> {
        Ok(self.syncs.read().get(id).cloned())
    }

    async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<SyncRecord>> {
        let mut listed: Vec<SyncRecord> = self
            .syncs
            .read()
            .values()
            .filter(|r| r.target_date >= from && r.target_date <= to)
            .cloned()
            .collect();
        listed.sort_by_key(|r| (r.target_date, r.started_at));
        Ok(listed)
    }

    async fn purge_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let mut syncs = self.syncs.write();
        let before = syncs.len();
        syncs.retain(|_, r| r.target_date >= threshold);
        Ok(before - syncs.len())
    }
}

impl LeagueStore for MemoryStore {
    async fn upsert(&self, record: &LeagueRecord) -> Result<()> {
        self.leagues
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn all(&self) -> Result<Vec<LeagueRecord>> {
        let mut all: Vec<LeagueRecord> = self.leagues.read().values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn mark_detected(&self, ids: &[LeagueId]) -> Result<()> {
        let mut leagues = self.leagues.write();
        for id in ids {
            leagues
                .entry(id.clone())
                .or_insert_with(|| LeagueRecord::new(id.clone(), id.as_str()))
                .detected = true;
        }
        Ok(())
    }

    async fn set_selected(&self, id: &LeagueId, selected: Option<bool>) -> Result<()> {
        if let Some(record) = self.leagues.write().get_mut(id) {
            record.selected = selected;
        }
        Ok(())
    }

    async fn set_blacklisted(&self, id: &LeagueId, blacklisted: bool) -> Result<()> {
        if let Some(record) = self.leagues.write().get_mut(id) {
            record.blacklisted = blacklisted;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Outcome, TeamId};
    use crate::testkit::domain::kickoff_on;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, d).unwrap()
    }

    fn fixture(id: &str, day: NaiveDate) -> Fixture {
        Fixture::new(
            FixtureId::new(id),
            kickoff_on(day),
            TeamId::new("10"),
            TeamId::new("20"),
            LeagueId::new("39"),
            Outcome::Home,
            0.7,
        )
    }

    #[tokio::test]
    async fn upsert_preserves_grading_state() {
        let store = MemoryStore::new();
        let mut f = fixture("fx-1", date(20));
        FixtureStore::upsert(&store, &f).await.unwrap();

        f.apply_result(Outcome::Away);
        store.record_result(&f).await.unwrap();

        let mut rerun = fixture("fx-1", date(20));
        rerun.predicted = Outcome::Draw;
        FixtureStore::upsert(&store, &rerun).await.unwrap();

        let loaded = FixtureStore::get(&store, &f.id).await.unwrap().unwrap();
        assert_eq!(loaded.predicted, Outcome::Draw);
        assert!(loaded.finished);
        assert_eq!(loaded.actual, Some(Outcome::Away));
    }

    #[tokio::test]
    async fn purge_retains_threshold_date() {
        let store = MemoryStore::new();
        FixtureStore::upsert(&store, &fixture("old", date(1))).await.unwrap();
        FixtureStore::upsert(&store, &fixture("edge", date(5))).await.unwrap();

        let deleted = FixtureStore::purge_older_than(&store, date(5)).await.unwrap();
        assert_eq!(deleted, 1);
        assert!(FixtureStore::get(&store, &FixtureId::new("edge"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn mark_detected_inserts_and_preserves() {
        let store = MemoryStore::new();
        let mut known = LeagueRecord::new(LeagueId::new("39"), "Premier League");
        known.blacklisted = true;
        LeagueStore::upsert(&store, &known).await.unwrap();

        store
            .mark_detected(&[LeagueId::new("39"), LeagueId::new("140")])
            .await
            .unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        let premier = all.iter().find(|r| r.id.as_str() == "39").unwrap();
        assert!(premier.detected);
        assert!(premier.blacklisted);
    }
}
