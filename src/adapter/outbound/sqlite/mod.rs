//! SQLite persistence adapter.
//!
//! Implements the storage ports over Diesel with a pooled SQLite
//! connection. Dates are persisted as ISO-8601 strings so lexicographic
//! comparison in SQL matches chronological order.

pub mod database;
pub mod fixture_store;
pub mod league_store;
pub mod sync_store;

pub use fixture_store::SqliteFixtureStore;
pub use league_store::SqliteLeagueStore;
pub use sync_store::SqliteSyncRecordStore;
