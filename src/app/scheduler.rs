//! Recurring job wiring.
//!
//! Three cron jobs drive the daily cycle: synchronize tomorrow's fixtures,
//! grade yesterday's results, and sweep retention. Every job body is an
//! idempotent entry point, so a missed or doubled tick is harmless. Job
//! failures are logged, never propagated; the scheduler keeps running.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::app::App;
use crate::error::{Error, Result};

/// Start the scheduler with the three recurring jobs attached.
///
/// Returns the running scheduler; the caller owns shutdown.
pub async fn start(app: Arc<App>) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new()
        .await
        .map_err(|e| Error::Scheduler(e.to_string()))?;

    scheduler
        .add(sync_job(Arc::clone(&app))?)
        .await
        .map_err(|e| Error::Scheduler(e.to_string()))?;
    scheduler
        .add(grade_job(Arc::clone(&app))?)
        .await
        .map_err(|e| Error::Scheduler(e.to_string()))?;
    scheduler
        .add(retention_job(Arc::clone(&app))?)
        .await
        .map_err(|e| Error::Scheduler(e.to_string()))?;

    scheduler
        .start()
        .await
        .map_err(|e| Error::Scheduler(e.to_string()))?;
    info!(
        sync = %app.schedule().sync,
        grade = %app.schedule().grade,
        retention = %app.schedule().retention,
        "scheduler started"
    );
    Ok(scheduler)
}

/// Synchronizes tomorrow's fixtures, so predictions exist before kickoff.
fn sync_job(app: Arc<App>) -> Result<Job> {
    let cron = app.schedule().sync.clone();
    Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let app = Arc::clone(&app);
        Box::pin(async move {
            let target = Utc::now().date_naive() + Duration::days(1);
            match app.run_sync(target).await {
                Ok(record) => {
                    info!(
                        date = %target,
                        status = %record.status,
                        considered = record.considered,
                        accepted = record.accepted,
                        "scheduled synchronization finished"
                    );
                }
                Err(e) => error!(date = %target, error = %e, "scheduled synchronization failed"),
            }
        })
    })
    .map_err(|e| Error::Scheduler(e.to_string()))
}

/// Grades yesterday's fixtures; unresolved matches stay pending for the
/// next tick.
fn grade_job(app: Arc<App>) -> Result<Job> {
    let cron = app.schedule().grade.clone();
    Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let app = Arc::clone(&app);
        Box::pin(async move {
            let date = Utc::now().date_naive() - Duration::days(1);
            match app.run_grade(date).await {
                Ok(report) => {
                    info!(
                        date = %date,
                        graded = report.graded,
                        correct = report.correct,
                        pending = report.pending,
                        "scheduled grading finished"
                    );
                }
                Err(e) => error!(date = %date, error = %e, "scheduled grading failed"),
            }
        })
    })
    .map_err(|e| Error::Scheduler(e.to_string()))
}

fn retention_job(app: Arc<App>) -> Result<Job> {
    let cron = app.schedule().retention.clone();
    Job::new_async(cron.as_str(), move |_uuid, _lock| {
        let app = Arc::clone(&app);
        Box::pin(async move {
            let today = Utc::now().date_naive();
            match app.run_retention(today).await {
                Ok(report) => {
                    info!(
                        fixtures = report.fixtures_purged,
                        sync_records = report.sync_records_purged,
                        "scheduled retention sweep finished"
                    );
                }
                Err(e) => error!(error = %e, "scheduled retention sweep failed"),
            }
        })
    })
    .map_err(|e| Error::Scheduler(e.to_string()))
}
