//! SQLite fixture store implementation.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::FixtureRow;
use crate::adapter::outbound::sqlite::database::schema::fixtures;
use crate::domain::{Fixture, FixtureId, LeagueId, Outcome, TeamId};
use crate::error::{Error, Result};
use crate::port::FixtureStore;

/// SQLite-backed fixture store.
pub struct SqliteFixtureStore {
    pool: DbPool,
}

impl SqliteFixtureStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(fixture: &Fixture) -> FixtureRow {
        FixtureRow {
            id: fixture.id.to_string(),
            day: fixture.day().to_string(),
            kickoff: fixture.kickoff.to_rfc3339(),
            home_team: fixture.home.to_string(),
            away_team: fixture.away.to_string(),
            league: fixture.league.to_string(),
            predicted: fixture.predicted.as_str().to_string(),
            confidence: fixture.confidence,
            finished: i32::from(fixture.finished),
            actual: fixture.actual.map(|o| o.as_str().to_string()),
            correct: fixture.correct.map(i32::from),
        }
    }

    fn from_row(row: FixtureRow) -> Result<Fixture> {
        let kickoff: DateTime<Utc> = DateTime::parse_from_rfc3339(&row.kickoff)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);
        let predicted = Outcome::parse(&row.predicted)
            .ok_or_else(|| Error::Parse(format!("unknown outcome '{}'", row.predicted)))?;
        let actual = row
            .actual
            .as_deref()
            .map(|s| Outcome::parse(s).ok_or_else(|| Error::Parse(format!("unknown outcome '{s}'"))))
            .transpose()?;

        Ok(Fixture {
            id: FixtureId::from(row.id),
            kickoff,
            home: TeamId::from(row.home_team),
            away: TeamId::from(row.away_team),
            league: LeagueId::from(row.league),
            predicted,
            confidence: row.confidence,
            finished: row.finished != 0,
            actual,
            correct: row.correct.map(|c| c != 0),
        })
    }
}

impl FixtureStore for SqliteFixtureStore {
    /// On conflict only the prediction side of the row is refreshed; the
    /// grading columns keep whatever the grader already wrote.
    async fn upsert(&self, fixture: &Fixture) -> Result<()> {
        let row = Self::to_row(fixture);
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::insert_into(fixtures::table)
            .values(&row)
            .on_conflict(fixtures::id)
            .do_update()
            .set((
                fixtures::day.eq(&row.day),
                fixtures::kickoff.eq(&row.kickoff),
                fixtures::home_team.eq(&row.home_team),
                fixtures::away_team.eq(&row.away_team),
                fixtures::league.eq(&row.league),
                fixtures::predicted.eq(&row.predicted),
                fixtures::confidence.eq(row.confidence),
            ))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn get(&self, id: &FixtureId) -> Result<Option<Fixture>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<FixtureRow> = fixtures::table
            .find(id.to_string())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }

    async fn list_on(&self, date: NaiveDate) -> Result<Vec<Fixture>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<FixtureRow> = fixtures::table
            .filter(fixtures::day.eq(date.to_string()))
            .order(fixtures::kickoff.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn record_result(&self, fixture: &Fixture) -> Result<()> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        diesel::update(fixtures::table.find(fixture.id.to_string()))
            .set((
                fixtures::finished.eq(i32::from(fixture.finished)),
                fixtures::actual.eq(fixture.actual.map(|o| o.as_str().to_string())),
                fixtures::correct.eq(fixture.correct.map(i32::from)),
            ))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(())
    }

    async fn purge_older_than(&self, threshold: NaiveDate) -> Result<usize> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let deleted = diesel::delete(fixtures::table.filter(fixtures::day.lt(threshold.to_string())))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted)
    }
}
