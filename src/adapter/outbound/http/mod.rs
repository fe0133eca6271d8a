//! REST provider adapter.
//!
//! One [`ApiClient`] is built per credential; each implements both provider
//! ports against the football data API.

pub mod client;
pub mod dto;

pub use client::ApiClient;
