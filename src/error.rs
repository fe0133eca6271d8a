use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures raised while synchronizing, filtering, or grading fixtures.
///
/// Per-fixture failures (`ProviderUnavailable`, `IncompleteStanding`) are
/// contained: the affected unit of work is skipped and the run continues.
/// Only `FatalFetchFailure` escalates to a failed run.
#[derive(Error, Debug, Clone)]
pub enum SyncError {
    /// The provider could not be reached after the local retry budget.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A team has no completed games, so its points-per-round rate is
    /// undefined. The fixture is excluded, not rejected.
    #[error("incomplete standing for team {team} in league {league}")]
    IncompleteStanding { team: String, league: String },

    #[error("run deadline exceeded")]
    RunDeadlineExceeded,

    /// The top-level fixture list could not be established.
    #[error("fatal fetch failure: {0}")]
    FatalFetchFailure(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("scheduler error: {0}")]
    Scheduler(String),
}

pub type Result<T> = std::result::Result<T, Error>;
