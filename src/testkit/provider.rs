//! Scriptable provider implementation for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use chrono::NaiveDate;
use parking_lot::RwLock;

use crate::domain::{FixtureId, LeagueId, Outcome, Standing};
use crate::error::{Error, Result, SyncError};
use crate::port::{FixtureProvider, RawFixture, StandingProvider};

/// A provider whose every answer is scripted up front.
///
/// Call counters expose how many requests each endpoint actually served,
/// which is how tests assert on request spend.
#[derive(Default)]
pub struct ScriptedProvider {
    fixtures: RwLock<HashMap<NaiveDate, Vec<RawFixture>>>,
    standings: RwLock<HashMap<LeagueId, Vec<Standing>>>,
    outcomes: RwLock<HashMap<FixtureId, Outcome>>,
    fail_list: AtomicBool,
    fail_standings: AtomicBool,
    list_calls: AtomicU32,
    standings_calls: AtomicU32,
    outcome_calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the fixture list returned for `date`.
    pub fn with_fixtures(self, date: NaiveDate, fixtures: Vec<RawFixture>) -> Self {
        self.fixtures.write().insert(date, fixtures);
        self
    }

    /// Script the standings table for a league.
    pub fn with_standings(self, league: LeagueId, standings: Vec<Standing>) -> Self {
        self.standings.write().insert(league, standings);
        self
    }

    /// Script the resolved outcome of a fixture. Fixtures without a
    /// scripted outcome report as unresolved.
    pub fn with_outcome(self, id: FixtureId, outcome: Outcome) -> Self {
        self.outcomes.write().insert(id, outcome);
        self
    }

    /// Make every fixture list fetch fail until cleared.
    pub fn set_fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    /// Make every standings fetch fail until cleared.
    pub fn set_fail_standings(&self, fail: bool) {
        self.fail_standings.store(fail, Ordering::SeqCst);
    }

    /// Resolve a fixture's outcome after construction, simulating a match
    /// finishing between grading passes.
    pub fn resolve_outcome(&self, id: FixtureId, outcome: Outcome) {
        self.outcomes.write().insert(id, outcome);
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn standings_calls(&self) -> u32 {
        self.standings_calls.load(Ordering::SeqCst)
    }

    pub fn outcome_calls(&self) -> u32 {
        self.outcome_calls.load(Ordering::SeqCst)
    }
}

impl FixtureProvider for ScriptedProvider {
    async fn list_fixtures(&self, date: NaiveDate, leagues: &[LeagueId]) -> Result<Vec<RawFixture>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(Error::Sync(SyncError::ProviderUnavailable(
                "scripted list failure".to_string(),
            )));
        }
        let all = self.fixtures.read().get(&date).cloned().unwrap_or_default();
        Ok(all
            .into_iter()
            .filter(|f| leagues.contains(&f.league))
            .collect())
    }

    async fn real_outcome(&self, id: &FixtureId) -> Result<Option<Outcome>> {
        self.outcome_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.outcomes.read().get(id).copied())
    }
}

impl StandingProvider for ScriptedProvider {
    async fn league_standings(&self, league: &LeagueId) -> Result<Vec<Standing>> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_standings.load(Ordering::SeqCst) {
            return Err(Error::Sync(SyncError::ProviderUnavailable(
                "scripted standings failure".to_string(),
            )));
        }
        Ok(self.standings.read().get(league).cloned().unwrap_or_default())
    }
}
