//! Configuration loading from TOML files with env overlays.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};
use crate::service::{FilterSettings, RetentionPolicy, SyncSettings};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sync: SyncConfig,
    pub retention: RetentionConfig,
    pub credentials: Vec<CredentialConfig>,
    pub schedule: ScheduleConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// Synchronization and filtering tunables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Per-credential request ceiling per run.
    pub allowed_requests: u32,
    /// Minimum spacing between a credential's requests, in milliseconds.
    pub delay_by_request_ms: u64,
    /// Tolerance band under the acceptance threshold.
    pub delta_probability_error: f64,
    /// Acceptance threshold; tuned week over week against observed results.
    pub current_accuracy: f64,
    pub estimate_home_points_per_round: f64,
    pub estimate_away_points_per_round: f64,
    /// Wall-clock budget for one run, in seconds.
    pub run_deadline_secs: u64,
    /// Spacing-denial retries per fixture before it is skipped.
    pub fixture_retry_limit: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            allowed_requests: 100,
            delay_by_request_ms: 350,
            delta_probability_error: 0.05,
            current_accuracy: 0.6,
            estimate_home_points_per_round: 1.7,
            estimate_away_points_per_round: 1.2,
            run_deadline_secs: 300,
            fixture_retry_limit: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    pub fixture_days: i64,
    pub sync_days: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            fixture_days: 15,
            sync_days: 30,
        }
    }
}

/// One provider credential. The key may be inlined or named via
/// `api_key_env` and resolved from the environment at build time.
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialConfig {
    pub label: String,
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_key_env: Option<String>,
}

impl CredentialConfig {
    /// Inline key wins; otherwise the named environment variable.
    pub fn resolved_key(&self) -> Result<String> {
        if !self.api_key.is_empty() {
            return Ok(self.api_key.clone());
        }
        let Some(ref var) = self.api_key_env else {
            return Err(ConfigError::MissingField {
                field: "credentials.api_key",
            }
            .into());
        };
        std::env::var(var).map_err(|_| {
            ConfigError::InvalidValue {
                field: "credentials.api_key_env",
                reason: format!("environment variable {var} is not set"),
            }
            .into()
        })
    }
}

/// Cron expressions for the three recurring jobs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub sync: String,
    pub grade: String,
    pub retention: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            sync: "0 0 6 * * *".to_string(),
            grade: "0 30 22 * * *".to_string(),
            retention: "0 0 3 * * *".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "fixturecast.db".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sync: SyncConfig::default(),
            retention: RetentionConfig::default(),
            credentials: Vec::new(),
            schedule: ScheduleConfig::default(),
            database: DatabaseConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.credentials.is_empty() {
            return Err(ConfigError::MissingField {
                field: "credentials",
            }
            .into());
        }
        if self.sync.allowed_requests == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sync.allowed_requests",
                reason: "must be positive".to_string(),
            }
            .into());
        }
        for (field, value) in [
            ("sync.current_accuracy", self.sync.current_accuracy),
            (
                "sync.delta_probability_error",
                self.sync.delta_probability_error,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("{value} is outside [0,1]"),
                }
                .into());
            }
        }
        for (field, value) in [
            (
                "sync.estimate_home_points_per_round",
                self.sync.estimate_home_points_per_round,
            ),
            (
                "sync.estimate_away_points_per_round",
                self.sync.estimate_away_points_per_round,
            ),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "baseline rate must be positive".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[must_use]
    pub fn filter_settings(&self) -> FilterSettings {
        FilterSettings {
            delta_probability_error: self.sync.delta_probability_error,
            current_accuracy: self.sync.current_accuracy,
            estimate_home_points_per_round: self.sync.estimate_home_points_per_round,
            estimate_away_points_per_round: self.sync.estimate_away_points_per_round,
        }
    }

    #[must_use]
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings {
            run_deadline: Duration::from_secs(self.sync.run_deadline_secs),
            fixture_retry_limit: self.sync.fixture_retry_limit,
        }
    }

    #[must_use]
    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy {
            fixture_days: self.retention.fixture_days,
            sync_days: self.retention.sync_days,
        }
    }

    #[must_use]
    pub fn delay_by_request(&self) -> Duration {
        Duration::from_millis(self.sync.delay_by_request_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn with_credential(mut config: Config) -> Config {
        config.credentials.push(CredentialConfig {
            label: "first".to_string(),
            base_url: "https://api.example.test".to_string(),
            api_key: "secret".to_string(),
            api_key_env: None,
        });
        config
    }

    #[test]
    fn default_config_with_credential_validates() {
        assert!(with_credential(Config::default()).validate().is_ok());
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let result = Config::default().validate();
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::MissingField { field: "credentials" }))
        ));
    }

    #[test]
    fn out_of_range_accuracy_is_rejected() {
        let mut config = with_credential(Config::default());
        config.sync.current_accuracy = 1.4;
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn zero_request_ceiling_is_rejected() {
        let mut config = with_credential(Config::default());
        config.sync.allowed_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn toml_overrides_defaults() {
        let config: Config = toml::from_str(
            r#"
            [sync]
            allowed_requests = 7
            current_accuracy = 0.75

            [[credentials]]
            label = "first"
            base_url = "https://api.example.test"
            api_key = "k"
            "#,
        )
        .unwrap();
        assert_eq!(config.sync.allowed_requests, 7);
        assert!((config.sync.current_accuracy - 0.75).abs() < 1e-9);
        // Untouched sections fall back to defaults.
        assert_eq!(config.retention.fixture_days, 15);
        assert_eq!(config.retention.sync_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn inline_api_key_wins_over_env() {
        let credential = CredentialConfig {
            label: "c".to_string(),
            base_url: "https://api.example.test".to_string(),
            api_key: "inline".to_string(),
            api_key_env: Some("FIXTURECAST_UNSET_KEY".to_string()),
        };
        assert_eq!(credential.resolved_key().unwrap(), "inline");
    }

    #[test]
    fn missing_key_and_env_is_an_error() {
        let credential = CredentialConfig {
            label: "c".to_string(),
            base_url: "https://api.example.test".to_string(),
            api_key: String::new(),
            api_key_env: None,
        };
        assert!(credential.resolved_key().is_err());
    }
}
