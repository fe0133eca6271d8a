//! Fixtures: scheduled matches with a predicted and, eventually, a real
//! outcome.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{FixtureId, LeagueId, TeamId};

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Home,
    Draw,
    Away,
}

impl Outcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Home => "home",
            Outcome::Draw => "draw",
            Outcome::Away => "away",
        }
    }

    /// Parse an outcome from its persisted form.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "home" => Some(Outcome::Home),
            "draw" => Some(Outcome::Draw),
            "away" => Some(Outcome::Away),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A scheduled match with a filter-assigned prediction.
///
/// `predicted` and `confidence` are set once by the probabilistic filter and
/// never mutated after initial persistence. `actual`, `correct` and
/// `finished` are set exactly once by the result grader; see
/// [`Fixture::apply_result`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    /// Scheduled start time, UTC.
    pub kickoff: DateTime<Utc>,
    pub home: TeamId,
    pub away: TeamId,
    pub league: LeagueId,
    pub predicted: Outcome,
    /// Estimated probability in [0,1] that `predicted` is correct.
    pub confidence: f64,
    pub finished: bool,
    pub actual: Option<Outcome>,
    pub correct: Option<bool>,
}

impl Fixture {
    /// Create a freshly filtered fixture, not yet graded.
    pub fn new(
        id: FixtureId,
        kickoff: DateTime<Utc>,
        home: TeamId,
        away: TeamId,
        league: LeagueId,
        predicted: Outcome,
        confidence: f64,
    ) -> Self {
        Self {
            id,
            kickoff,
            home,
            away,
            league,
            predicted,
            confidence,
            finished: false,
            actual: None,
            correct: None,
        }
    }

    /// Calendar date of the kickoff, used as the storage partition key.
    #[must_use]
    pub fn day(&self) -> NaiveDate {
        self.kickoff.date_naive()
    }

    /// Record the real outcome of the match.
    ///
    /// Returns `true` if grading state was written. Grading an
    /// already-finished fixture is a no-op (returns `false`), which keeps
    /// repeated grading passes idempotent.
    pub fn apply_result(&mut self, actual: Outcome) -> bool {
        if self.finished {
            return false;
        }
        self.correct = Some(actual == self.predicted);
        self.actual = Some(actual);
        self.finished = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(predicted: Outcome) -> Fixture {
        Fixture::new(
            FixtureId::new("fx-1"),
            Utc::now(),
            TeamId::new("home"),
            TeamId::new("away"),
            LeagueId::new("league"),
            predicted,
            0.72,
        )
    }

    #[test]
    fn new_fixture_is_ungraded() {
        let f = fixture(Outcome::Home);
        assert!(!f.finished);
        assert_eq!(f.actual, None);
        assert_eq!(f.correct, None);
    }

    #[test]
    fn apply_result_marks_correct_prediction() {
        let mut f = fixture(Outcome::Home);
        assert!(f.apply_result(Outcome::Home));
        assert!(f.finished);
        assert_eq!(f.actual, Some(Outcome::Home));
        assert_eq!(f.correct, Some(true));
    }

    #[test]
    fn apply_result_marks_incorrect_prediction() {
        let mut f = fixture(Outcome::Home);
        assert!(f.apply_result(Outcome::Away));
        assert_eq!(f.correct, Some(false));
    }

    #[test]
    fn regrading_finished_fixture_is_noop() {
        let mut f = fixture(Outcome::Home);
        assert!(f.apply_result(Outcome::Home));
        // A second grading pass must not rewrite the outcome.
        assert!(!f.apply_result(Outcome::Away));
        assert_eq!(f.actual, Some(Outcome::Home));
        assert_eq!(f.correct, Some(true));
    }

    #[test]
    fn outcome_roundtrips_through_persisted_form() {
        for outcome in [Outcome::Home, Outcome::Draw, Outcome::Away] {
            assert_eq!(Outcome::parse(outcome.as_str()), Some(outcome));
        }
        assert_eq!(Outcome::parse("postponed"), None);
    }
}
