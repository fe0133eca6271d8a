//! REST client bound to one provider credential.

use std::collections::HashSet;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{FixtureId, LeagueId, Outcome, Standing};
use crate::error::{Error, Result, SyncError};
use crate::port::{FixtureProvider, RawFixture, StandingProvider};

use super::dto::{Envelope, FixtureDto, StandingsDto};

/// Transient failures (transport errors, 5xx) are retried this many times
/// before the request is given up as `ProviderUnavailable`.
const RETRY_LIMIT: u32 = 2;
const RETRY_BACKOFF: Duration = Duration::from_millis(250);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the football data API, one per credential.
///
/// Rate limiting is the orchestrator's business; this client only handles
/// transport, authentication, and its local transient-retry budget.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    label: String,
}

impl ApiClient {
    pub fn new(label: impl Into<String>, base_url: &str, api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
            label: label.into(),
        })
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.base_url.join(path)?;
        let mut attempt = 0;
        loop {
            let sent = self
                .http
                .get(url.clone())
                .query(query)
                .header("x-apisports-key", &self.api_key)
                .send()
                .await;

            let transient = match sent {
                Ok(response) if response.status().is_server_error() => {
                    format!("server error {}", response.status())
                }
                Ok(response) => {
                    let response = response.error_for_status()?;
                    return Ok(response.json::<T>().await?);
                }
                Err(e) if e.is_timeout() || e.is_connect() || e.is_request() => e.to_string(),
                Err(e) => return Err(e.into()),
            };

            attempt += 1;
            if attempt > RETRY_LIMIT {
                return Err(Error::Sync(SyncError::ProviderUnavailable(format!(
                    "{path} via {}: {transient}",
                    self.label
                ))));
            }
            warn!(
                credential = %self.label,
                path,
                attempt,
                error = %transient,
                "provider request failed, retrying"
            );
            tokio::time::sleep(RETRY_BACKOFF).await;
        }
    }
}

impl FixtureProvider for ApiClient {
    /// The API lists by date only, so the eligible-league restriction is
    /// applied client-side over the single response.
    async fn list_fixtures(&self, date: NaiveDate, leagues: &[LeagueId]) -> Result<Vec<RawFixture>> {
        let envelope: Envelope<FixtureDto> = self
            .get_json("fixtures", &[("date", date.to_string())])
            .await?;
        let eligible: HashSet<&LeagueId> = leagues.iter().collect();
        let mut fixtures = Vec::new();
        for dto in &envelope.response {
            let raw = dto.to_raw()?;
            if eligible.contains(&raw.league) {
                fixtures.push(raw);
            }
        }
        debug!(
            credential = %self.label,
            date = %date,
            listed = envelope.response.len(),
            eligible = fixtures.len(),
            "fixtures listed"
        );
        Ok(fixtures)
    }

    async fn real_outcome(&self, id: &FixtureId) -> Result<Option<Outcome>> {
        let envelope: Envelope<FixtureDto> = self
            .get_json("fixtures", &[("id", id.as_str().to_string())])
            .await?;
        Ok(envelope.response.first().and_then(FixtureDto::outcome))
    }
}

impl StandingProvider for ApiClient {
    async fn league_standings(&self, league: &LeagueId) -> Result<Vec<Standing>> {
        let season = Utc::now().year().to_string();
        let envelope: Envelope<StandingsDto> = self
            .get_json(
                "standings",
                &[("league", league.as_str().to_string()), ("season", season)],
            )
            .await?;
        Ok(envelope
            .response
            .first()
            .map(StandingsDto::to_standings)
            .unwrap_or_default())
    }
}
