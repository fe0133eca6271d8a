//! The per-credential probabilistic fixture filter.

use crate::domain::{Outcome, Standing};
use crate::error::SyncError;
use crate::port::RawFixture;

/// Tunables for the probabilistic filter.
#[derive(Debug, Clone)]
pub struct FilterSettings {
    /// Tolerance band below the acceptance threshold; a safety margin
    /// against model miscalibration, not a hard cutoff.
    pub delta_probability_error: f64,
    /// Minimum acceptance threshold, tracking the observed rolling accuracy.
    pub current_accuracy: f64,
    /// Baseline points-per-round rate expected of a home side.
    pub estimate_home_points_per_round: f64,
    /// Baseline points-per-round rate expected of an away side.
    pub estimate_away_points_per_round: f64,
}

/// An outcome estimate produced by a model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub outcome: Outcome,
    /// Estimated probability in [0,1] that `outcome` is correct.
    pub confidence: f64,
}

/// Strategy turning observed points-per-round rates into an outcome
/// estimate.
///
/// Implementations must be deterministic for identical inputs, and
/// confidence must be monotonically non-decreasing as the favored side's
/// observed rate rises above its baseline.
pub trait OutcomeModel: Send + Sync {
    fn predict(&self, home_rate: f64, away_rate: f64, settings: &FilterSettings) -> Prediction;
}

/// Default model: symmetric linear blend of baseline deviations.
///
/// Each side's observed rate is normalized against its role baseline; the
/// difference of the two normalized deviations picks the favored side, and
/// its magnitude maps affinely onto [0,1] around an even-odds midpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsRateModel;

impl PointsRateModel {
    fn deviation(observed: f64, baseline: f64) -> f64 {
        if baseline <= 0.0 {
            observed
        } else {
            (observed - baseline) / baseline
        }
    }
}

impl OutcomeModel for PointsRateModel {
    fn predict(&self, home_rate: f64, away_rate: f64, settings: &FilterSettings) -> Prediction {
        let home_dev = Self::deviation(home_rate, settings.estimate_home_points_per_round);
        let away_dev = Self::deviation(away_rate, settings.estimate_away_points_per_round);
        let edge = (home_dev - away_dev) / 2.0;

        let outcome = if edge > 0.0 {
            Outcome::Home
        } else if edge < 0.0 {
            Outcome::Away
        } else {
            Outcome::Draw
        };
        let confidence = (0.5 + edge.abs()).clamp(0.0, 1.0);

        Prediction {
            outcome,
            confidence,
        }
    }
}

/// A filter verdict on one fixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub accept: bool,
    pub predicted: Outcome,
    pub confidence: f64,
}

/// Decides whether a fixture is a confident candidate.
///
/// One instance is bound to each provider credential; the standings it
/// consumes are fetched by the orchestrator worker under rate-limiter
/// control, so evaluation itself is a pure function of its inputs.
pub struct ProbabilisticFilter {
    settings: FilterSettings,
    model: Box<dyn OutcomeModel>,
}

impl ProbabilisticFilter {
    pub fn new(settings: FilterSettings, model: Box<dyn OutcomeModel>) -> Self {
        Self { settings, model }
    }

    pub fn with_default_model(settings: FilterSettings) -> Self {
        Self::new(settings, Box::new(PointsRateModel))
    }

    /// Evaluate one fixture against both teams' standings.
    ///
    /// Accepts iff `confidence >= current_accuracy - delta_probability_error`,
    /// so estimates within the tolerance band of the threshold still pass.
    /// A team with zero games played yields `IncompleteStanding`: the
    /// fixture is excluded, neither accepted nor rejected.
    pub fn evaluate(
        &self,
        fixture: &RawFixture,
        home: &Standing,
        away: &Standing,
    ) -> std::result::Result<Decision, SyncError> {
        let home_rate = home
            .points_per_round()
            .ok_or_else(|| SyncError::IncompleteStanding {
                team: home.team.to_string(),
                league: fixture.league.to_string(),
            })?;
        let away_rate = away
            .points_per_round()
            .ok_or_else(|| SyncError::IncompleteStanding {
                team: away.team.to_string(),
                league: fixture.league.to_string(),
            })?;

        let prediction = self.model.predict(home_rate, away_rate, &self.settings);
        let accept = prediction.confidence
            >= self.settings.current_accuracy - self.settings.delta_probability_error;

        Ok(Decision {
            accept,
            predicted: prediction.outcome,
            confidence: prediction.confidence,
        })
    }
}
