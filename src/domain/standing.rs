//! Team standings: accumulated performance within a league.

use serde::{Deserialize, Serialize};

use super::id::{LeagueId, TeamId};

/// A team's accumulated record in a league, read-only from the core's
/// perspective and always fetched fresh from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub team: TeamId,
    pub league: LeagueId,
    pub played: u32,
    pub points: u32,
}

impl Standing {
    pub fn new(team: TeamId, league: LeagueId, played: u32, points: u32) -> Self {
        Self {
            team,
            league,
            played,
            points,
        }
    }

    /// Points accumulated per game played, the team-strength proxy used by
    /// the probabilistic filter. `None` when no games have been played.
    #[must_use]
    pub fn points_per_round(&self) -> Option<f64> {
        if self.played == 0 {
            None
        } else {
            Some(f64::from(self.points) / f64::from(self.played))
        }
    }
}
