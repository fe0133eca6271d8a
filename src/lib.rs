//! Fixturecast - fixture prediction synchronization and grading.
//!
//! This crate periodically ingests upcoming football fixtures from a
//! rate-limited provider API, scores each fixture with a probabilistic
//! outcome estimate, keeps only the high-confidence subset, and later
//! reconciles predictions against real results into a rolling accuracy
//! figure.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **[`domain`]** - Provider-agnostic types: fixtures, standings, league
//!   eligibility records, synchronization records.
//! - **[`port`]** - Trait seams for the outbound collaborators: the fixture
//!   and standings provider, and the persistent stores.
//! - **[`service`]** - The core: rate limiting and credential rotation, the
//!   probabilistic filter with its pluggable [`service::OutcomeModel`],
//!   league gating, the synchronization orchestrator, result grading,
//!   accuracy evaluation, and retention sweeping.
//! - **[`adapter`]** - Outbound implementations: a reqwest provider client
//!   per credential and Diesel/SQLite stores.
//! - **[`app`]** - Construction-time dependency graph and the scheduled job
//!   entry points (`run_sync`, `run_grade`, `run_retention`).
//! - **[`cli`]** - Command-line surface for the daemon and one-shot runs.
//!
//! # Example
//!
//! ```no_run
//! use fixturecast::config::Config;
//! use fixturecast::app::App;
//!
//! # async fn demo() -> fixturecast::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let app = App::build(&config)?;
//! let record = app.run_sync(chrono::Utc::now().date_naive()).await?;
//! println!("accepted {} fixtures", record.accepted);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod service;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
