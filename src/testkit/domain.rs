//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for fixtures, standings, and league
//! records so tests focus on assertions rather than construction
//! boilerplate.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{FixtureId, LeagueId, LeagueRecord, Standing, TeamId};
use crate::port::RawFixture;

/// Kickoff at 18:00 UTC on the given date.
pub fn kickoff_on(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(18, 0, 0)
        .expect("valid time")
        .and_utc()
}

/// Create a [`RawFixture`] in the given league, kicking off on `date`.
pub fn raw_fixture(id: &str, date: NaiveDate, home: &str, away: &str, league: &str) -> RawFixture {
    RawFixture {
        id: FixtureId::new(id),
        kickoff: kickoff_on(date),
        home: TeamId::new(home),
        away: TeamId::new(away),
        league: LeagueId::new(league),
    }
}

/// Create a [`Standing`] row.
pub fn standing(team: &str, league: &str, played: u32, points: u32) -> Standing {
    Standing::new(TeamId::new(team), LeagueId::new(league), played, points)
}

/// Create a detected, unconstrained [`LeagueRecord`].
pub fn detected_league(id: &str) -> LeagueRecord {
    let mut record = LeagueRecord::new(LeagueId::new(id), id);
    record.detected = true;
    record
}
