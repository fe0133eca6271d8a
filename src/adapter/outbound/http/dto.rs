//! Wire DTOs for the football data API.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{FixtureId, LeagueId, Outcome, Standing, TeamId};
use crate::error::{Error, Result};
use crate::port::RawFixture;

/// Every endpoint wraps its payload in a `response` array.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub response: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureDto {
    pub fixture: FixtureMeta,
    pub league: LeagueRef,
    pub teams: TeamPair,
    pub goals: Goals,
}

#[derive(Debug, Deserialize)]
pub struct FixtureMeta {
    pub id: i64,
    pub date: String,
    pub status: StatusRef,
}

#[derive(Debug, Deserialize)]
pub struct StatusRef {
    pub short: String,
}

#[derive(Debug, Deserialize)]
pub struct LeagueRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct TeamPair {
    pub home: TeamRef,
    pub away: TeamRef,
}

#[derive(Debug, Deserialize)]
pub struct TeamRef {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Goals {
    pub home: Option<i64>,
    pub away: Option<i64>,
}

/// Statuses that mark a match as fully resolved.
const FINISHED_STATUSES: &[&str] = &["FT", "AET", "PEN"];

impl FixtureDto {
    pub fn to_raw(&self) -> Result<RawFixture> {
        let kickoff: DateTime<Utc> = DateTime::parse_from_rfc3339(&self.fixture.date)
            .map_err(|e| Error::Parse(e.to_string()))?
            .with_timezone(&Utc);
        Ok(RawFixture {
            id: FixtureId::new(self.fixture.id.to_string()),
            kickoff,
            home: TeamId::new(self.teams.home.id.to_string()),
            away: TeamId::new(self.teams.away.id.to_string()),
            league: LeagueId::new(self.league.id.to_string()),
        })
    }

    /// Real outcome, or `None` while the match is unresolved (scheduled,
    /// in play, postponed).
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if !FINISHED_STATUSES.contains(&self.fixture.status.short.as_str()) {
            return None;
        }
        let home = self.goals.home?;
        let away = self.goals.away?;
        Some(if home > away {
            Outcome::Home
        } else if home < away {
            Outcome::Away
        } else {
            Outcome::Draw
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StandingsDto {
    pub league: StandingsLeague,
}

#[derive(Debug, Deserialize)]
pub struct StandingsLeague {
    pub id: i64,
    /// The API nests one table per group; single-table leagues have one.
    pub standings: Vec<Vec<StandingRowDto>>,
}

#[derive(Debug, Deserialize)]
pub struct StandingRowDto {
    pub team: TeamRef,
    pub points: i64,
    pub all: StandingGamesDto,
}

#[derive(Debug, Deserialize)]
pub struct StandingGamesDto {
    pub played: i64,
}

impl StandingsDto {
    pub fn to_standings(&self) -> Vec<Standing> {
        let league = LeagueId::new(self.league.id.to_string());
        self.league
            .standings
            .iter()
            .flatten()
            .map(|row| {
                Standing::new(
                    TeamId::new(row.team.id.to_string()),
                    league.clone(),
                    row.all.played.max(0) as u32,
                    row.points.max(0) as u32,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_JSON: &str = r#"{
        "fixture": {"id": 882, "date": "2025-08-20T19:00:00+00:00", "status": {"short": "FT"}},
        "league": {"id": 39},
        "teams": {"home": {"id": 10}, "away": {"id": 20}},
        "goals": {"home": 2, "away": 1}
    }"#;

    #[test]
    fn fixture_dto_maps_to_raw_fixture() {
        let dto: FixtureDto = serde_json::from_str(FIXTURE_JSON).unwrap();
        let raw = dto.to_raw().unwrap();
        assert_eq!(raw.id.as_str(), "882");
        assert_eq!(raw.league.as_str(), "39");
        assert_eq!(raw.home.as_str(), "10");
        assert_eq!(raw.kickoff.date_naive().to_string(), "2025-08-20");
    }

    #[test]
    fn finished_fixture_yields_outcome() {
        let dto: FixtureDto = serde_json::from_str(FIXTURE_JSON).unwrap();
        assert_eq!(dto.outcome(), Some(Outcome::Home));
    }

    #[test]
    fn unresolved_fixture_yields_no_outcome() {
        let json = FIXTURE_JSON.replace("\"FT\"", "\"PST\"");
        let dto: FixtureDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.outcome(), None);
    }

    #[test]
    fn level_goals_are_a_draw() {
        let json = FIXTURE_JSON.replace("\"away\": 1", "\"away\": 2");
        let dto: FixtureDto = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn standings_flatten_group_tables() {
        let dto: StandingsDto = serde_json::from_str(
            r#"{
                "league": {
                    "id": 39,
                    "standings": [
                        [{"team": {"id": 10}, "points": 21, "all": {"played": 10}}],
                        [{"team": {"id": 20}, "points": 9, "all": {"played": 10}}]
                    ]
                }
            }"#,
        )
        .unwrap();
        let standings = dto.to_standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].points, 21);
        assert_eq!(standings[1].team.as_str(), "20");
    }
}
