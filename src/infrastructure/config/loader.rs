//! Hierarchical configuration loading and validation.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Access token is required: set github.token or the GITHUB_TOKEN environment variable")]
    MissingToken,

    #[error("github.owner cannot be empty")]
    EmptyOwner,

    #[error("github.repo cannot be empty")]
    EmptyRepo,

    #[error("project.number is required and must be non-zero")]
    MissingProjectNumber,

    #[error("project.status_field cannot be empty")]
    EmptyStatusField,

    #[error("project.target_status cannot be empty")]
    EmptyTargetStatus,

    #[error("target_branch cannot be empty")]
    EmptyTargetBranch,

    #[error("Enterprise mode requires github.server_url or github.graphql_url")]
    MissingEnterpriseUrl,

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid burst_size: {0}. Must be at least 1")]
    InvalidBurstSize(u32),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .herald/config.yaml (project config)
    /// 3. .herald/local.yaml (local overrides, optional)
    /// 4. Environment variables (HERALD_* prefix, highest priority)
    ///
    /// The access token additionally falls back to `GITHUB_TOKEN`, the
    /// variable CI schedulers conventionally provide.
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".herald/config.yaml"))
            .merge(Yaml::file(".herald/local.yaml"))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        let config = Self::with_token_fallback(config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file (plus defaults, env, and
    /// the token fallback).
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("HERALD_").split("__"))
            .extract()
            .context(format!("Failed to load config from {}", path.as_ref().display()))?;

        let config = Self::with_token_fallback(config);
        Self::validate(&config)?;
        Ok(config)
    }

    fn with_token_fallback(mut config: Config) -> Config {
        if config.github.token.as_deref().map_or(true, str::is_empty) {
            if let Ok(token) = std::env::var("GITHUB_TOKEN") {
                if !token.is_empty() {
                    config.github.token = Some(token);
                }
            }
        }
        config
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.github.token.as_deref().map_or(true, str::is_empty) {
            return Err(ConfigError::MissingToken);
        }
        if config.github.owner.is_empty() {
            return Err(ConfigError::EmptyOwner);
        }
        if config.github.repo.is_empty() {
            return Err(ConfigError::EmptyRepo);
        }
        if config.github.enterprise
            && config.github.server_url.is_none()
            && config.github.graphql_url.is_none()
        {
            return Err(ConfigError::MissingEnterpriseUrl);
        }
        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        if config.project.number == 0 {
            return Err(ConfigError::MissingProjectNumber);
        }
        if config.project.status_field.is_empty() {
            return Err(ConfigError::EmptyStatusField);
        }
        if config.project.target_status.is_empty() {
            return Err(ConfigError::EmptyTargetStatus);
        }
        if config.target_branch.is_empty() {
            return Err(ConfigError::EmptyTargetBranch);
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.rate_limit.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(config.rate_limit.requests_per_second));
        }
        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        if config.retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(config.retry.max_retries));
        }
        if config.retry.initial_backoff_ms >= config.retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        Ok(())
    }
}
