//! Rolling accuracy over graded fixtures.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::Result;
use crate::port::FixtureStore;

/// Aggregates graded fixtures into a per-date accuracy figure.
pub struct AccuracyEvaluator<F> {
    fixtures: Arc<F>,
}

impl<F> AccuracyEvaluator<F>
where
    F: FixtureStore,
{
    pub fn new(fixtures: Arc<F>) -> Self {
        Self { fixtures }
    }

    /// `correct / graded` for all finished fixtures on `date`.
    ///
    /// `None` when nothing has been graded: "no data" is distinct from
    /// "0% accurate".
    pub async fn accuracy_for(&self, date: NaiveDate) -> Result<Option<f64>> {
        let fixtures = self.fixtures.list_on(date).await?;
        let graded = fixtures.iter().filter(|f| f.finished).count();
        if graded == 0 {
            return Ok(None);
        }
        let correct = fixtures
            .iter()
            .filter(|f| f.correct == Some(true))
            .count();
        Ok(Some(correct as f64 / graded as f64))
    }
}
