//! The synchronization orchestrator.
//!
//! Drives one run for a target date: resolves eligible leagues, fetches the
//! fixture list, fans per-fixture evaluation out across one worker per
//! credential under rate-limiter control, persists survivors, and writes the
//! run's ledger entry.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::{CredentialSpend, Fixture, LeagueId, SyncRecord, SyncStatus};
use crate::error::{Result, SyncError};
use crate::port::{FixtureProvider, FixtureStore, LeagueStore, RawFixture, StandingProvider,
    SyncRecordStore};
use crate::service::filter::ProbabilisticFilter;
use crate::service::gate::LeagueGate;
use crate::service::rate_limiter::{acquire_rotating, Acquire, RateLimiter};

/// Orchestrator tunables derived from configuration.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    /// Overall wall-clock budget for one run; expiry finalizes the run as
    /// partial.
    pub run_deadline: Duration,
    /// Spacing-denial retries per fixture before the fixture is skipped.
    pub fixture_retry_limit: u32,
}

/// One provider credential with its bound filter instance.
pub struct CredentialSlot<P> {
    pub label: String,
    pub provider: Arc<P>,
    pub filter: ProbabilisticFilter,
}

impl<P> CredentialSlot<P> {
    pub fn new(label: impl Into<String>, provider: Arc<P>, filter: ProbabilisticFilter) -> Self {
        Self {
            label: label.into(),
            provider,
            filter,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Tally {
    accepted: u32,
    rejected: u32,
    skipped: u32,
}

/// Shared state of one in-flight run, handed to every worker.
struct RunContext<P, F> {
    slots: Arc<Vec<CredentialSlot<P>>>,
    limiter: Arc<RateLimiter>,
    fixtures: Arc<F>,
    settings: SyncSettings,
    queue: Mutex<VecDeque<RawFixture>>,
    tally: Mutex<Tally>,
    deadline: Instant,
    deadline_hit: AtomicBool,
}

enum Slot {
    Granted,
    /// The credential's run budget is spent; the worker retires.
    Exhausted,
    /// Spacing retries used up; the fixture is skipped, the worker goes on.
    GaveUp,
}

pub struct SyncOrchestrator<P, F, S, L> {
    slots: Arc<Vec<CredentialSlot<P>>>,
    limiter: Arc<RateLimiter>,
    fixtures: Arc<F>,
    syncs: Arc<S>,
    leagues: Arc<L>,
    settings: SyncSettings,
    /// Single-flight guard: two runs must never interleave, or the
    /// idempotent re-run contract loses its meaning.
    run_lock: tokio::sync::Mutex<()>,
}

impl<P, F, S, L> SyncOrchestrator<P, F, S, L>
where
    P: FixtureProvider + StandingProvider + 'static,
    F: FixtureStore + 'static,
    S: SyncRecordStore,
    L: LeagueStore,
{
    pub fn new(
        slots: Vec<CredentialSlot<P>>,
        limiter: Arc<RateLimiter>,
        fixtures: Arc<F>,
        syncs: Arc<S>,
        leagues: Arc<L>,
        settings: SyncSettings,
    ) -> Self {
        Self {
            slots: Arc::new(slots),
            limiter,
            fixtures,
            syncs,
            leagues,
            settings,
            run_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// Execute one synchronization run for `target_date`.
    ///
    /// Provider failures on individual fixtures are contained; only a
    /// failure to establish the fixture list baseline fails the run. The
    /// returned record is already persisted in its final state.
    pub async fn execute(&self, target_date: chrono::NaiveDate) -> Result<SyncRecord> {
        self.run(target_date, None).await
    }

    /// Like [`SyncOrchestrator::execute`], restricted to a single league.
    ///
    /// The league still has to pass the eligibility gate; targeting an
    /// unknown or blacklisted league finalizes an empty successful run
    /// without spending any provider requests.
    pub async fn execute_league(
        &self,
        target_date: chrono::NaiveDate,
        league: &LeagueId,
    ) -> Result<SyncRecord> {
        self.run(target_date, Some(league)).await
    }

    async fn run(
        &self,
        target_date: chrono::NaiveDate,
        only: Option<&LeagueId>,
    ) -> Result<SyncRecord> {
        let _flight = self.run_lock.lock().await;
        self.limiter.reset();

        let mut record = SyncRecord::begin(target_date);
        self.syncs.insert(&record).await?;
        info!(date = %target_date, run = %record.id, "synchronization run started");

        let gate = LeagueGate::new(self.leagues.all().await?);
        let mut eligible = gate.eligible_ids();
        if let Some(league) = only {
            eligible.retain(|id| id == league);
        }
        if eligible.is_empty() {
            info!(date = %target_date, "no eligible leagues, nothing to synchronize");
            record.finalize(SyncStatus::Succeeded, 0, 0, self.spend());
            self.syncs.finalize(&record).await?;
            return Ok(record);
        }

        let listed = match self.fetch_fixture_list(target_date, &eligible).await {
            Ok(listed) => listed,
            Err(e) => {
                error!(date = %target_date, error = %e, "fixture list fetch failed, run aborted");
                record.finalize(SyncStatus::Failed, 0, 0, self.spend());
                self.syncs.finalize(&record).await?;
                return Ok(record);
            }
        };
        let considered = listed.len() as u32;
        debug!(date = %target_date, considered, "fixture list established");

        let ctx = Arc::new(RunContext {
            slots: Arc::clone(&self.slots),
            limiter: Arc::clone(&self.limiter),
            fixtures: Arc::clone(&self.fixtures),
            settings: self.settings.clone(),
            queue: Mutex::new(VecDeque::from(listed)),
            tally: Mutex::new(Tally::default()),
            deadline: Instant::now() + self.settings.run_deadline,
            deadline_hit: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(self.slots.len());
        for credential in 0..self.slots.len() {
            let ctx = Arc::clone(&ctx);
            workers.push(tokio::spawn(run_worker(ctx, credential)));
        }
        for worker in workers {
            let _ = worker.await;
        }

        let leftover = ctx.queue.lock().len();
        let tally = *ctx.tally.lock();
        let status = if ctx.deadline_hit.load(Ordering::Relaxed) || leftover > 0 {
            SyncStatus::Partial
        } else {
            SyncStatus::Succeeded
        };

        record.finalize(status, considered, tally.accepted, self.spend());
        self.syncs.finalize(&record).await?;
        info!(
            date = %target_date,
            considered,
            accepted = tally.accepted,
            rejected = tally.rejected,
            skipped = tally.skipped,
            leftover,
            status = %record.status,
            "synchronization run finished"
        );
        Ok(record)
    }

    /// The fixture list fetch itself consumes one rate-limiter slot, taken
    /// from the first credential with budget.
    async fn fetch_fixture_list(
        &self,
        date: chrono::NaiveDate,
        leagues: &[LeagueId],
    ) -> Result<Vec<RawFixture>> {
        let credential =
            acquire_rotating(&self.limiter, 0, self.settings.fixture_retry_limit)
                .await
                .ok_or_else(|| {
                    SyncError::FatalFetchFailure(
                        "all credentials exhausted before the fixture list fetch".to_string(),
                    )
                })?;
        self.slots[credential]
            .provider
            .list_fixtures(date, leagues)
            .await
            .map_err(|e| SyncError::FatalFetchFailure(e.to_string()).into())
    }

    fn spend(&self) -> Vec<CredentialSpend> {
        self.slots
            .iter()
            .zip(self.limiter.spent())
            .map(|(slot, requests)| CredentialSpend {
                label: slot.label.clone(),
                requests,
            })
            .collect()
    }
}

/// One worker per credential, all pulling from the shared queue so no
/// credential starves while another has unused budget.
async fn run_worker<P, F>(ctx: Arc<RunContext<P, F>>, credential: usize)
where
    P: FixtureProvider + StandingProvider + 'static,
    F: FixtureStore + 'static,
{
    let slot = &ctx.slots[credential];
    loop {
        if Instant::now() >= ctx.deadline {
            warn!(credential = %slot.label, "run deadline reached, stopping evaluations");
            ctx.deadline_hit.store(true, Ordering::Relaxed);
            break;
        }
        let Some(raw) = ctx.queue.lock().pop_front() else {
            break;
        };

        match acquire_slot(&ctx, credential).await {
            Slot::Granted => {}
            Slot::Exhausted => {
                // Hand the fixture back for a credential that still has
                // budget; if none remains, the leftover marks the run
                // partial.
                ctx.queue.lock().push_front(raw);
                debug!(credential = %slot.label, "request budget spent, worker retiring");
                break;
            }
            Slot::GaveUp => {
                warn!(
                    credential = %slot.label,
                    fixture = %raw.id,
                    "spacing retries exhausted, fixture skipped"
                );
                ctx.tally.lock().skipped += 1;
                continue;
            }
        }

        match evaluate_fixture(slot, &raw).await {
            Ok(Some(fixture)) => match ctx.fixtures.upsert(&fixture).await {
                Ok(()) => {
                    debug!(
                        fixture = %fixture.id,
                        predicted = %fixture.predicted,
                        confidence = fixture.confidence,
                        "fixture accepted"
                    );
                    ctx.tally.lock().accepted += 1;
                }
                Err(e) => {
                    warn!(fixture = %fixture.id, error = %e, "fixture persistence failed");
                    ctx.tally.lock().skipped += 1;
                }
            },
            Ok(None) => {
                ctx.tally.lock().rejected += 1;
            }
            Err(e) => {
                // Contained: one fixture lost, the run carries on.
                warn!(fixture = %raw.id, error = %e, "fixture evaluation skipped");
                ctx.tally.lock().skipped += 1;
            }
        }
    }
}

async fn acquire_slot<P, F>(ctx: &RunContext<P, F>, credential: usize) -> Slot {
    let mut attempts = 0;
    loop {
        match ctx.limiter.try_acquire(credential) {
            Acquire::Granted => return Slot::Granted,
            Acquire::Denied { wait: None } => return Slot::Exhausted,
            Acquire::Denied { wait: Some(wait) } => {
                attempts += 1;
                if attempts > ctx.settings.fixture_retry_limit
                    || Instant::now() + wait >= ctx.deadline
                {
                    return Slot::GaveUp;
                }
                tokio::time::sleep(wait).await;
            }
        }
    }
}

/// Evaluate one fixture under its assigned credential.
///
/// `Ok(None)` means the filter rejected it; errors mean the fixture could
/// not be evaluated at all (provider gap or incomplete standing).
async fn evaluate_fixture<P>(
    slot: &CredentialSlot<P>,
    raw: &RawFixture,
) -> Result<Option<Fixture>>
where
    P: FixtureProvider + StandingProvider,
{
    let standings = slot.provider.league_standings(&raw.league).await?;
    let home = standings
        .iter()
        .find(|s| s.team == raw.home)
        .ok_or_else(|| SyncError::IncompleteStanding {
            team: raw.home.to_string(),
            league: raw.league.to_string(),
        })?;
    let away = standings
        .iter()
        .find(|s| s.team == raw.away)
        .ok_or_else(|| SyncError::IncompleteStanding {
            team: raw.away.to_string(),
            league: raw.league.to_string(),
        })?;

    let decision = slot.filter.evaluate(raw, home, away)?;
    if !decision.accept {
        debug!(
            fixture = %raw.id,
            confidence = decision.confidence,
            "fixture below acceptance threshold"
        );
        return Ok(None);
    }

    Ok(Some(Fixture::new(
        raw.id.clone(),
        raw.kickoff,
        raw.home.clone(),
        raw.away.clone(),
        raw.league.clone(),
        decision.predicted,
        decision.confidence,
    )))
}
