//! Synchronization run records.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::SyncId;

/// Terminal (or in-flight) status of a synchronization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    Running,
    Succeeded,
    /// The run stopped early: credentials exhausted or deadline expired.
    Partial,
    /// The top-level fixture list fetch failed; nothing was processed.
    Failed,
}

impl SyncStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Running => "running",
            SyncStatus::Succeeded => "succeeded",
            SyncStatus::Partial => "partial",
            SyncStatus::Failed => "failed",
        }
    }

    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "running" => Some(SyncStatus::Running),
            "succeeded" => Some(SyncStatus::Succeeded),
            "partial" => Some(SyncStatus::Partial),
            "failed" => Some(SyncStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Requests spent by one credential during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSpend {
    pub label: String,
    pub requests: u32,
}

/// Durable record of one synchronization run.
///
/// Created with [`SyncRecord::begin`] at run start and finalized exactly
/// once at run end; immutable thereafter except for deletion by the
/// retention sweeper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRecord {
    pub id: SyncId,
    pub target_date: NaiveDate,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Fixtures returned by the provider for the target date.
    pub considered: u32,
    /// Fixtures that survived the probabilistic filter and were persisted.
    pub accepted: u32,
    pub requests: Vec<CredentialSpend>,
    pub status: SyncStatus,
}

impl SyncRecord {
    /// Open a new in-flight record for `target_date`.
    #[must_use]
    pub fn begin(target_date: NaiveDate) -> Self {
        Self {
            id: SyncId::new(),
            target_date,
            started_at: Utc::now(),
            finished_at: None,
            considered: 0,
            accepted: 0,
            requests: Vec::new(),
            status: SyncStatus::Running,
        }
    }

    /// Close the record with its final accounting. A second call is a
    /// no-op: a finalized record never changes again.
    pub fn finalize(
        &mut self,
        status: SyncStatus,
        considered: u32,
        accepted: u32,
        requests: Vec<CredentialSpend>,
    ) {
        if self.finished_at.is_some() {
            return;
        }
        self.status = status;
        self.considered = considered;
        self.accepted = accepted;
        self.requests = requests;
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_opens_running_record() {
        let record = SyncRecord::begin(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());
        assert_eq!(record.status, SyncStatus::Running);
        assert!(record.finished_at.is_none());
        assert_eq!(record.considered, 0);
    }

    #[test]
    fn finalize_closes_record_once() {
        let mut record = SyncRecord::begin(NaiveDate::from_ymd_opt(2025, 8, 20).unwrap());
        record.finalize(
            SyncStatus::Succeeded,
            5,
            3,
            vec![CredentialSpend {
                label: "first".to_string(),
                requests: 2,
            }],
        );
        assert_eq!(record.status, SyncStatus::Succeeded);
        assert!(record.finished_at.is_some());

        // A finalized record is immutable.
        record.finalize(SyncStatus::Failed, 0, 0, Vec::new());
        assert_eq!(record.status, SyncStatus::Succeeded);
        assert_eq!(record.accepted, 3);
    }

    #[test]
    fn status_roundtrips_through_persisted_form() {
        for status in [
            SyncStatus::Running,
            SyncStatus::Succeeded,
            SyncStatus::Partial,
            SyncStatus::Failed,
        ] {
            assert_eq!(SyncStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(SyncStatus::parse("aborted"), None);
    }
}
