//! Application wiring.
//!
//! Builds the whole dependency graph once at startup: SQLite-backed stores
//! over one connection pool, one HTTP client per configured credential, and
//! the services on top. Job entry points here are what both the scheduler
//! and the one-shot CLI commands invoke.

pub mod scheduler;

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::adapter::outbound::http::ApiClient;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{
    SqliteFixtureStore, SqliteLeagueStore, SqliteSyncRecordStore,
};
use crate::config::{Config, ScheduleConfig};
use crate::domain::{LeagueId, LeagueRecord, SyncRecord};
use crate::error::Result;
use crate::service::{
    CredentialSlot, GradeReport, ProbabilisticFilter, QueryService, RateLimiter, ResultGrader,
    RetentionSweeper, SweepReport, SyncOrchestrator,
};

type Orchestrator =
    SyncOrchestrator<ApiClient, SqliteFixtureStore, SqliteSyncRecordStore, SqliteLeagueStore>;
type Grader = ResultGrader<ApiClient, SqliteFixtureStore>;
type Sweeper = RetentionSweeper<SqliteFixtureStore, SqliteSyncRecordStore>;
type Queries = QueryService<SqliteFixtureStore, SqliteSyncRecordStore, SqliteLeagueStore>;

/// The assembled application.
pub struct App {
    orchestrator: Orchestrator,
    grader: Grader,
    sweeper: Sweeper,
    queries: Queries,
    leagues: Arc<SqliteLeagueStore>,
    schedule: ScheduleConfig,
}

impl App {
    /// Build the full dependency graph from a validated configuration.
    ///
    /// Runs pending migrations before anything touches the database. The
    /// orchestrator and the grader each get their own rate limiter; both
    /// reset their limiter at the start of every run.
    pub fn build(config: &Config) -> Result<Self> {
        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;

        let fixtures = Arc::new(SqliteFixtureStore::new(pool.clone()));
        let syncs = Arc::new(SqliteSyncRecordStore::new(pool.clone()));
        let leagues = Arc::new(SqliteLeagueStore::new(pool));

        let mut slots = Vec::with_capacity(config.credentials.len());
        let mut providers = Vec::with_capacity(config.credentials.len());
        for credential in &config.credentials {
            let client = Arc::new(ApiClient::new(
                credential.label.clone(),
                &credential.base_url,
                credential.resolved_key()?,
            )?);
            providers.push((credential.label.clone(), Arc::clone(&client)));
            slots.push(CredentialSlot::new(
                credential.label.clone(),
                client,
                ProbabilisticFilter::with_default_model(config.filter_settings()),
            ));
        }
        info!(credentials = slots.len(), "provider credentials configured");

        let sync_limiter = Arc::new(RateLimiter::new(
            slots.len(),
            config.sync.allowed_requests,
            config.delay_by_request(),
        ));
        let grade_limiter = Arc::new(RateLimiter::new(
            providers.len(),
            config.sync.allowed_requests,
            config.delay_by_request(),
        ));

        let orchestrator = SyncOrchestrator::new(
            slots,
            sync_limiter,
            Arc::clone(&fixtures),
            Arc::clone(&syncs),
            Arc::clone(&leagues),
            config.sync_settings(),
        );
        let grader = ResultGrader::new(
            providers,
            grade_limiter,
            Arc::clone(&fixtures),
            config.sync.fixture_retry_limit,
        );
        let sweeper = RetentionSweeper::new(
            Arc::clone(&fixtures),
            Arc::clone(&syncs),
            config.retention_policy(),
        );
        let queries = QueryService::new(fixtures, syncs, Arc::clone(&leagues));

        Ok(Self {
            orchestrator,
            grader,
            sweeper,
            queries,
            leagues,
            schedule: config.schedule.clone(),
        })
    }

    /// One synchronization run for `target_date`.
    pub async fn run_sync(&self, target_date: NaiveDate) -> Result<SyncRecord> {
        self.orchestrator.execute(target_date).await
    }

    /// One synchronization run for `target_date`, restricted to one league.
    pub async fn run_sync_league(
        &self,
        target_date: NaiveDate,
        league: &LeagueId,
    ) -> Result<SyncRecord> {
        self.orchestrator.execute_league(target_date, league).await
    }

    /// One grading pass over `date`.
    pub async fn run_grade(&self, date: NaiveDate) -> Result<GradeReport> {
        self.grader.grade_date(date).await
    }

    /// One retention sweep relative to `today`.
    pub async fn run_retention(&self, today: NaiveDate) -> Result<SweepReport> {
        self.sweeper.sweep(today).await
    }

    #[must_use]
    pub fn queries(&self) -> &Queries {
        &self.queries
    }

    #[must_use]
    pub fn schedule(&self) -> &ScheduleConfig {
        &self.schedule
    }

    // Operator surface over league eligibility.

    pub async fn league_records(&self) -> Result<Vec<LeagueRecord>> {
        use crate::port::LeagueStore;
        self.leagues.all().await
    }

    pub async fn mark_leagues_detected(&self, ids: &[LeagueId]) -> Result<()> {
        use crate::port::LeagueStore;
        self.leagues.mark_detected(ids).await
    }

    pub async fn select_league(&self, id: &LeagueId, selected: Option<bool>) -> Result<()> {
        use crate::port::LeagueStore;
        self.leagues.set_selected(id, selected).await
    }

    pub async fn blacklist_league(&self, id: &LeagueId, blacklisted: bool) -> Result<()> {
        use crate::port::LeagueStore;
        self.leagues.set_blacklisted(id, blacklisted).await
    }
}
