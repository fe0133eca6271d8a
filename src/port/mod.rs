//! Trait seams for the externally-owned collaborators.
//!
//! The core consumes providers and stores exclusively through these traits;
//! production adapters live under [`crate::adapter`], test doubles under
//! [`crate::testkit`].

pub mod provider;
pub mod store;

pub use provider::{FixtureProvider, RawFixture, StandingProvider};
pub use store::{FixtureStore, LeagueStore, SyncRecordStore};
