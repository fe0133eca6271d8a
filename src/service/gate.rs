//! League eligibility gating.

use std::collections::HashMap;

use crate::domain::{LeagueId, LeagueRecord};

/// Pure lookup over the league records loaded at run start.
///
/// No network calls happen here; `detected` comes from the external
/// detection signal and the remaining flags from operator configuration,
/// all persisted in the league store.
pub struct LeagueGate {
    records: HashMap<LeagueId, LeagueRecord>,
}

impl LeagueGate {
    pub fn new(records: Vec<LeagueRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    /// Absence of a record means the league was never detected: ineligible.
    #[must_use]
    pub fn is_eligible(&self, id: &LeagueId) -> bool {
        self.records
            .get(id)
            .map(LeagueRecord::eligible)
            .unwrap_or(false)
    }

    /// Eligible league ids, sorted for deterministic provider queries.
    #[must_use]
    pub fn eligible_ids(&self) -> Vec<LeagueId> {
        let mut ids: Vec<LeagueId> = self
            .records
            .values()
            .filter(|record| record.eligible())
            .map(|record| record.id.clone())
            .collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: &str,
        detected: bool,
        selected: Option<bool>,
        blacklisted: bool,
    ) -> LeagueRecord {
        LeagueRecord {
            id: LeagueId::new(id),
            name: id.to_string(),
            detected,
            selected,
            blacklisted,
        }
    }

    #[test]
    fn gate_applies_full_truth_table() {
        let gate = LeagueGate::new(vec![
            record("detected-only", true, None, false),
            record("selected", true, Some(true), false),
            record("deselected", true, Some(false), false),
            record("blacklisted", true, Some(true), true),
            record("undetected", false, Some(true), false),
        ]);

        assert!(gate.is_eligible(&LeagueId::new("detected-only")));
        assert!(gate.is_eligible(&LeagueId::new("selected")));
        assert!(!gate.is_eligible(&LeagueId::new("deselected")));
        assert!(!gate.is_eligible(&LeagueId::new("blacklisted")));
        assert!(!gate.is_eligible(&LeagueId::new("undetected")));
    }

    #[test]
    fn unknown_league_is_ineligible() {
        let gate = LeagueGate::new(Vec::new());
        assert!(!gate.is_eligible(&LeagueId::new("nowhere")));
    }

    #[test]
    fn eligible_ids_are_sorted() {
        let gate = LeagueGate::new(vec![
            record("zeta", true, None, false),
            record("alpha", true, None, false),
            record("mid", true, None, false),
        ]);
        let ids = gate.eligible_ids();
        let ids: Vec<&str> = ids.iter().map(LeagueId::as_str).collect();
        assert_eq!(ids, vec!["alpha", "mid", "zeta"]);
    }
}
