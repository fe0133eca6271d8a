//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{fixtures, leagues, sync_records};

/// Database row for a fixture. The `day` column duplicates the kickoff's
/// calendar date so listing and retention can compare date strings directly.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = fixtures)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct FixtureRow {
    pub id: String,
    pub day: String,
    pub kickoff: String,
    pub home_team: String,
    pub away_team: String,
    pub league: String,
    pub predicted: String,
    pub confidence: f64,
    pub finished: i32,
    pub actual: Option<String>,
    pub correct: Option<i32>,
}

/// Database row for a synchronization run record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = sync_records)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SyncRecordRow {
    pub id: String,
    pub target_date: String,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub considered: i32,
    pub accepted: i32,
    /// Per-credential spend, JSON-encoded.
    pub requests: String,
    pub status: String,
}

/// Database row for a league eligibility record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = leagues)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct LeagueRow {
    pub id: String,
    pub name: String,
    pub detected: i32,
    pub selected: Option<i32>,
    pub blacklisted: i32,
}
