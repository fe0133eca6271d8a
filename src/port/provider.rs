//! Outbound provider ports: fixture listings, standings, real outcomes.

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{FixtureId, LeagueId, Outcome, Standing, TeamId};
use crate::error::Result;

/// A fixture as listed by the provider, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFixture {
    pub id: FixtureId,
    pub kickoff: DateTime<Utc>,
    pub home: TeamId,
    pub away: TeamId,
    pub league: LeagueId,
}

/// Source of scheduled fixtures and their real outcomes.
pub trait FixtureProvider: Send + Sync {
    /// List fixtures scheduled on `date`, restricted to the given leagues.
    fn list_fixtures(
        &self,
        date: NaiveDate,
        leagues: &[LeagueId],
    ) -> impl Future<Output = Result<Vec<RawFixture>>> + Send;

    /// Real outcome of a fixture, or `None` while the match is unresolved
    /// (not yet played, in play, or postponed).
    fn real_outcome(&self, id: &FixtureId)
        -> impl Future<Output = Result<Option<Outcome>>> + Send;
}

/// Source of league standings tables.
pub trait StandingProvider: Send + Sync {
    /// Current standings for every team in a league. One provider request,
    /// regardless of how many teams the caller extracts.
    fn league_standings(
        &self,
        league: &LeagueId,
    ) -> impl Future<Output = Result<Vec<Standing>>> + Send;
}
