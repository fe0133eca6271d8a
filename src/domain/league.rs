//! League eligibility records.

use serde::{Deserialize, Serialize};

use super::id::LeagueId;

/// Eligibility state of a league, combining the auto-detected signal with
/// operator selection and blacklisting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub id: LeagueId,
    pub name: String,
    /// Populated by the external detection signal.
    pub detected: bool,
    /// Operator selection; `None` means "no opinion" and does not veto.
    pub selected: Option<bool>,
    /// Operator blacklist; dominates every other flag.
    pub blacklisted: bool,
}

impl LeagueRecord {
    pub fn new(id: LeagueId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            detected: false,
            selected: None,
            blacklisted: false,
        }
    }

    /// A league is eligible iff detected, not blacklisted, and either
    /// unselected or explicitly selected.
    #[must_use]
    pub fn eligible(&self) -> bool {
        self.detected && !self.blacklisted && self.selected.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(detected: bool, selected: Option<bool>, blacklisted: bool) -> LeagueRecord {
        LeagueRecord {
            id: LeagueId::new("premier"),
            name: "Premier".to_string(),
            detected,
            selected,
            blacklisted,
        }
    }

    #[test]
    fn detected_unselected_league_is_eligible() {
        assert!(record(true, None, false).eligible());
    }

    #[test]
    fn explicitly_selected_league_is_eligible() {
        assert!(record(true, Some(true), false).eligible());
    }

    #[test]
    fn deselected_league_is_ineligible() {
        assert!(!record(true, Some(false), false).eligible());
    }

    #[test]
    fn blacklist_dominates_selection() {
        assert!(!record(true, Some(true), true).eligible());
        assert!(!record(true, None, true).eligible());
    }

    #[test]
    fn undetected_league_is_ineligible() {
        assert!(!record(false, Some(true), false).eligible());
    }
}
