//! Canonical test settings.

use std::time::Duration;

use crate::service::{FilterSettings, SyncSettings};

/// Filter settings with a 0.6 threshold and a 0.05 tolerance band;
/// baselines match the production defaults.
pub fn filter_settings() -> FilterSettings {
    FilterSettings {
        delta_probability_error: 0.05,
        current_accuracy: 0.6,
        estimate_home_points_per_round: 1.5,
        estimate_away_points_per_round: 1.0,
    }
}

/// Orchestrator settings with a deadline generous enough that tests never
/// trip it by accident.
pub fn sync_settings() -> SyncSettings {
    SyncSettings {
        run_deadline: Duration::from_secs(30),
        fixture_retry_limit: 3,
    }
}
