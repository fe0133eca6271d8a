//! Post-hoc grading of predictions against real results.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::port::{FixtureProvider, FixtureStore};
use crate::service::rate_limiter::{acquire_rotating, RateLimiter};

/// Outcome of one grading pass over a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GradeReport {
    /// Fixtures graded during this pass.
    pub graded: u32,
    /// Graded fixtures whose prediction matched the real outcome.
    pub correct: u32,
    /// Fixtures left unfinished, to be retried on a later pass.
    pub pending: u32,
}

/// Marks stored predictions as finished, correct, or incorrect.
///
/// Grading is safely repeatable: already-finished fixtures are skipped and
/// unresolved matches stay pending until a later scheduled pass resolves
/// them. Result fetches spend the same provider quota as synchronization,
/// so they run under their own run-scoped limiter reset.
pub struct ResultGrader<P, F> {
    providers: Vec<(String, Arc<P>)>,
    limiter: Arc<RateLimiter>,
    fixtures: Arc<F>,
    retry_limit: u32,
}

impl<P, F> ResultGrader<P, F>
where
    P: FixtureProvider,
    F: FixtureStore,
{
    pub fn new(
        providers: Vec<(String, Arc<P>)>,
        limiter: Arc<RateLimiter>,
        fixtures: Arc<F>,
        retry_limit: u32,
    ) -> Self {
        Self {
            providers,
            limiter,
            fixtures,
            retry_limit,
        }
    }

    /// Grade every ungraded fixture on `date` whose kickoff has passed.
    pub async fn grade_date(&self, date: NaiveDate) -> Result<GradeReport> {
        self.limiter.reset();
        let mut report = GradeReport::default();
        let now = Utc::now();
        let mut cursor = 0usize;

        let mut queue = self.fixtures.list_on(date).await?.into_iter();
        while let Some(mut fixture) = queue.next() {
            if fixture.finished {
                continue;
            }
            if fixture.kickoff > now {
                report.pending += 1;
                continue;
            }

            let Some(credential) =
                acquire_rotating(&self.limiter, cursor, self.retry_limit).await
            else {
                // Budget spent; this fixture and the rest of the ungraded
                // backlog get picked up next tick.
                let deferred = 1 + queue.by_ref().filter(|f| !f.finished).count() as u32;
                report.pending += deferred;
                warn!(date = %date, deferred, "grading budget exhausted, backlog deferred");
                break;
            };
            cursor = (credential + 1) % self.providers.len();

            match self.providers[credential].1.real_outcome(&fixture.id).await {
                Ok(Some(actual)) => {
                    if fixture.apply_result(actual) {
                        self.fixtures.record_result(&fixture).await?;
                        report.graded += 1;
                        if fixture.correct == Some(true) {
                            report.correct += 1;
                        }
                    }
                }
                Ok(None) => {
                    debug!(fixture = %fixture.id, "result not yet available");
                    report.pending += 1;
                }
                Err(e) => {
                    warn!(fixture = %fixture.id, error = %e, "result fetch failed, will retry later");
                    report.pending += 1;
                }
            }
        }

        info!(
            date = %date,
            graded = report.graded,
            correct = report.correct,
            pending = report.pending,
            "grading pass finished"
        );
        Ok(report)
    }
}
