//! Grading passes and accuracy evaluation over scripted results.

mod support;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate, Utc};

use fixturecast::domain::{Fixture, FixtureId, LeagueId, Outcome, TeamId};
use fixturecast::port::FixtureStore;
use fixturecast::service::{AccuracyEvaluator, RateLimiter, ResultGrader};
use fixturecast::testkit::provider::ScriptedProvider;
use fixturecast::testkit::store::MemoryStore;

fn grade_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 20).unwrap()
}

fn past_fixture(id: &str, predicted: Outcome) -> Fixture {
    Fixture::new(
        FixtureId::new(id),
        grade_date().and_hms_opt(12, 0, 0).unwrap().and_utc(),
        TeamId::new("home"),
        TeamId::new("away"),
        LeagueId::new("39"),
        predicted,
        0.8,
    )
}

fn grader(
    provider: &Arc<ScriptedProvider>,
    store: &Arc<MemoryStore>,
    allowed_requests: u32,
) -> ResultGrader<ScriptedProvider, MemoryStore> {
    ResultGrader::new(
        vec![("first".to_string(), Arc::clone(provider))],
        Arc::new(RateLimiter::new(1, allowed_requests, Duration::ZERO)),
        Arc::clone(store),
        3,
    )
}

#[tokio::test]
async fn grades_finished_matches_and_derives_accuracy() {
    let store = Arc::new(MemoryStore::new());
    let mut provider = ScriptedProvider::new();
    // Seven predictions of a home win; five come true.
    for i in 0..7 {
        let id = format!("fx-{i}");
        store
            .upsert(&past_fixture(&id, Outcome::Home))
            .await
            .unwrap();
        let actual = if i < 5 { Outcome::Home } else { Outcome::Away };
        provider = provider.with_outcome(FixtureId::new(&id), actual);
    }
    let provider = Arc::new(provider);

    let report = grader(&provider, &store, 100)
        .grade_date(grade_date())
        .await
        .unwrap();

    assert_eq!(report.graded, 7);
    assert_eq!(report.correct, 5);
    assert_eq!(report.pending, 0);

    let accuracy = AccuracyEvaluator::new(Arc::clone(&store))
        .accuracy_for(grade_date())
        .await
        .unwrap()
        .unwrap();
    assert!((accuracy - 5.0 / 7.0).abs() < 1e-9);
}

#[tokio::test]
async fn finished_fixtures_are_never_regraded() {
    let store = Arc::new(MemoryStore::new());
    let mut fixture = past_fixture("fx-0", Outcome::Home);
    store.upsert(&fixture).await.unwrap();
    fixture.apply_result(Outcome::Home);
    store.record_result(&fixture).await.unwrap();

    let provider =
        Arc::new(ScriptedProvider::new().with_outcome(FixtureId::new("fx-0"), Outcome::Away));
    let report = grader(&provider, &store, 100)
        .grade_date(grade_date())
        .await
        .unwrap();

    assert_eq!(report.graded, 0);
    assert_eq!(provider.outcome_calls(), 0);
    let kept = store.get(&FixtureId::new("fx-0")).await.unwrap().unwrap();
    assert_eq!(kept.actual, Some(Outcome::Home));
    assert_eq!(kept.correct, Some(true));
}

#[tokio::test]
async fn unresolved_matches_stay_pending_until_a_later_pass() {
    let store = Arc::new(MemoryStore::new());
    store
        .upsert(&past_fixture("fx-0", Outcome::Home))
        .await
        .unwrap();
    let provider = Arc::new(ScriptedProvider::new());
    let sut = grader(&provider, &store, 100);

    let first = sut.grade_date(grade_date()).await.unwrap();
    assert_eq!(first.graded, 0);
    assert_eq!(first.pending, 1);

    // The match finishes between passes.
    provider.resolve_outcome(FixtureId::new("fx-0"), Outcome::Home);
    let second = sut.grade_date(grade_date()).await.unwrap();
    assert_eq!(second.graded, 1);
    assert_eq!(second.correct, 1);
    assert_eq!(second.pending, 0);
}

#[tokio::test]
async fn future_kickoffs_are_not_fetched() {
    let store = Arc::new(MemoryStore::new());
    let date = (Utc::now() + ChronoDuration::days(2)).date_naive();
    let mut fixture = past_fixture("fx-future", Outcome::Home);
    fixture.kickoff = date.and_hms_opt(18, 0, 0).unwrap().and_utc();
    store.upsert(&fixture).await.unwrap();

    let provider = Arc::new(ScriptedProvider::new());
    let report = grader(&provider, &store, 100).grade_date(date).await.unwrap();

    assert_eq!(report.graded, 0);
    assert_eq!(report.pending, 1);
    assert_eq!(provider.outcome_calls(), 0);
}

#[tokio::test]
async fn exhausted_grading_budget_defers_the_rest() {
    let store = Arc::new(MemoryStore::new());
    let mut provider = ScriptedProvider::new();
    for i in 0..3 {
        let id = format!("fx-{i}");
        store
            .upsert(&past_fixture(&id, Outcome::Home))
            .await
            .unwrap();
        provider = provider.with_outcome(FixtureId::new(&id), Outcome::Home);
    }
    let provider = Arc::new(provider);

    let report = grader(&provider, &store, 1)
        .grade_date(grade_date())
        .await
        .unwrap();

    assert_eq!(report.graded, 1);
    // The fixture that hit the empty budget plus the one never examined.
    assert_eq!(report.pending, 2);
    assert_eq!(provider.outcome_calls(), 1);

    // A later pass with budget finishes the job.
    let report = grader(&provider, &store, 100)
        .grade_date(grade_date())
        .await
        .unwrap();
    assert_eq!(report.graded, 2);
}

#[tokio::test]
async fn accuracy_is_none_until_something_is_graded() {
    let store = Arc::new(MemoryStore::new());
    store
        .upsert(&past_fixture("fx-0", Outcome::Home))
        .await
        .unwrap();

    let accuracy = AccuracyEvaluator::new(Arc::clone(&store))
        .accuracy_for(grade_date())
        .await
        .unwrap();
    assert_eq!(accuracy, None);
}
