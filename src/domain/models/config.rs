//! Configuration model for herald.

use serde::{Deserialize, Serialize};

/// Main configuration structure for herald.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub connection settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Project board settings.
    #[serde(default)]
    pub project: ProjectConfig,

    /// Branch whose merges trigger reconciliation.
    #[serde(default = "default_target_branch")]
    pub target_branch: String,

    /// Compute and log decisions without mutating the board.
    #[serde(default)]
    pub dry_run: bool,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Rate limiting configuration.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Retry policy configuration.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_target_branch() -> String {
    "dev".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            project: ProjectConfig::default(),
            target_branch: default_target_branch(),
            dry_run: false,
            logging: LoggingConfig::default(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Whether the project board is owned by an organization or a user.
///
/// Selects the GraphQL query path used to look the project up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnerType {
    Organization,
    User,
}

impl Default for OwnerType {
    fn default() -> Self {
        Self::Organization
    }
}

/// GitHub connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GitHubConfig {
    /// Access token. Falls back to the `GITHUB_TOKEN` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Repository owner (user or organisation name).
    #[serde(default)]
    pub owner: String,

    /// Repository name.
    #[serde(default)]
    pub repo: String,

    /// Whether the owner is an organization or a user.
    #[serde(default)]
    pub owner_type: OwnerType,

    /// Use a GitHub Enterprise endpoint instead of the public API.
    #[serde(default)]
    pub enterprise: bool,

    /// Base URL of the GitHub Enterprise server (e.g. `https://github.example.com`).
    /// Ignored unless `enterprise` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    /// Explicit GraphQL endpoint override; takes precedence over
    /// `enterprise`/`server_url` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql_url: Option<String>,

    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: None,
            owner: String::new(),
            repo: String::new(),
            owner_type: OwnerType::default(),
            enterprise: false,
            server_url: None,
            graphql_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GitHubConfig {
    /// Resolve the GraphQL endpoint from the configured inputs.
    ///
    /// Precedence: explicit `graphql_url`, then `<server_url>/api/graphql`
    /// in enterprise mode, then the public endpoint.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.graphql_url {
            return url.clone();
        }
        if self.enterprise {
            if let Some(server) = &self.server_url {
                return format!("{}/api/graphql", server.trim_end_matches('/'));
            }
        }
        "https://api.github.com/graphql".to_string()
    }
}

/// Project board configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProjectConfig {
    /// Number of the target project board.
    #[serde(default)]
    pub number: u64,

    /// Name of the single-select field to mutate.
    #[serde(default = "default_status_field")]
    pub status_field: String,

    /// Status option items transition to on merge.
    #[serde(default = "default_target_status")]
    pub target_status: String,
}

fn default_status_field() -> String {
    "Status".to_string()
}

fn default_target_status() -> String {
    "QA Testing".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            number: 0,
            status_field: default_status_field(),
            target_status: default_target_status(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Rate limiting configuration for the token-bucket limiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests per second allowed.
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Burst size for the token bucket.
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

const fn default_requests_per_second() -> f64 {
    2.0
}

const fn default_burst_size() -> u32 {
    10
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
        }
    }
}

/// Retry policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Maximum number of attempts for a transient failure.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff delay in milliseconds.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff delay in milliseconds.
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

const fn default_max_retries() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    1_000
}

const fn default_max_backoff_ms() -> u64 {
    30_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target_branch, "dev");
        assert_eq!(config.project.status_field, "Status");
        assert_eq!(config.project.target_status, "QA Testing");
        assert_eq!(config.github.timeout_secs, 30);
        assert!(!config.dry_run);
        assert_eq!(config.retry.max_retries, 3);
    }

    #[test]
    fn test_endpoint_public_default() {
        let github = GitHubConfig::default();
        assert_eq!(github.endpoint(), "https://api.github.com/graphql");
    }

    #[test]
    fn test_endpoint_enterprise_from_server_url() {
        let github = GitHubConfig {
            enterprise: true,
            server_url: Some("https://github.example.com/".to_string()),
            ..Default::default()
        };
        assert_eq!(github.endpoint(), "https://github.example.com/api/graphql");
    }

    #[test]
    fn test_endpoint_explicit_override_wins() {
        let github = GitHubConfig {
            enterprise: true,
            server_url: Some("https://github.example.com".to_string()),
            graphql_url: Some("https://proxy.internal/graphql".to_string()),
            ..Default::default()
        };
        assert_eq!(github.endpoint(), "https://proxy.internal/graphql");
    }

    #[test]
    fn test_owner_type_deserializes_lowercase() {
        let t: OwnerType = serde_json::from_str("\"organization\"").unwrap();
        assert_eq!(t, OwnerType::Organization);
        let t: OwnerType = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(t, OwnerType::User);
    }
}
