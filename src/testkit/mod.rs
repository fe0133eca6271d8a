//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`provider`] - [`ScriptedProvider`](provider::ScriptedProvider), a
//!   scriptable implementation of both provider ports.
//! - [`store`] - [`MemoryStore`](store::MemoryStore), an in-memory
//!   implementation of every storage port.
//! - [`domain`] - Builders for domain primitives: fixtures, standings,
//!   league records.
//! - [`config`] - Canonical test settings for the filter and orchestrator.

pub mod config;
pub mod domain;
pub mod provider;
pub mod store;
