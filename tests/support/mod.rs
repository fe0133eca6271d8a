//! Shared helpers for integration tests.

#![allow(dead_code)]

pub mod temp_db;

use std::sync::Arc;
use std::time::Duration;

use fixturecast::service::{
    CredentialSlot, ProbabilisticFilter, RateLimiter, SyncOrchestrator, SyncSettings,
};
use fixturecast::testkit::config::{filter_settings, sync_settings};
use fixturecast::testkit::provider::ScriptedProvider;
use fixturecast::testkit::store::MemoryStore;

pub const CREDENTIAL_LABELS: [&str; 3] = ["first", "second", "third"];

/// Orchestrator over a scripted provider and an in-memory store, with
/// `credentials` slots sharing the provider and a zero-delay limiter.
pub fn orchestrator(
    provider: &Arc<ScriptedProvider>,
    store: &Arc<MemoryStore>,
    credentials: usize,
    allowed_requests: u32,
) -> SyncOrchestrator<ScriptedProvider, MemoryStore, MemoryStore, MemoryStore> {
    orchestrator_with(
        provider,
        store,
        credentials,
        allowed_requests,
        sync_settings(),
    )
}

pub fn orchestrator_with(
    provider: &Arc<ScriptedProvider>,
    store: &Arc<MemoryStore>,
    credentials: usize,
    allowed_requests: u32,
    settings: SyncSettings,
) -> SyncOrchestrator<ScriptedProvider, MemoryStore, MemoryStore, MemoryStore> {
    let slots: Vec<CredentialSlot<ScriptedProvider>> = (0..credentials)
        .map(|i| {
            CredentialSlot::new(
                CREDENTIAL_LABELS[i % CREDENTIAL_LABELS.len()],
                Arc::clone(provider),
                ProbabilisticFilter::with_default_model(filter_settings()),
            )
        })
        .collect();
    let limiter = Arc::new(RateLimiter::new(
        credentials,
        allowed_requests,
        Duration::ZERO,
    ));
    SyncOrchestrator::new(
        slots,
        limiter,
        Arc::clone(store),
        Arc::clone(store),
        Arc::clone(store),
        settings,
    )
}
