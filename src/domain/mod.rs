//! Provider-agnostic domain types.

pub mod fixture;
pub mod id;
pub mod league;
pub mod standing;
pub mod sync;

pub use fixture::{Fixture, Outcome};
pub use id::{FixtureId, LeagueId, SyncId, TeamId};
pub use league::LeagueRecord;
pub use standing::Standing;
pub use sync::{CredentialSpend, SyncRecord, SyncStatus};
