//! Domain errors for the herald reconciliation engine.

use thiserror::Error;

/// Format an optional retry-after hint: ` (retry after 30s)` or nothing.
fn format_retry_after(secs: &Option<u64>) -> String {
    secs.map(|s| format!(" (retry after {s}s)")).unwrap_or_default()
}

/// Errors produced while reconciling board state with merged pull requests.
///
/// Only `Config` and `Collection` are fatal for a run. `Resolution` and
/// `Mutation` are scoped to a single pull request or item and are logged
/// and skipped by the engine. `RateLimited`, `Transport`, and 5xx `Api`
/// errors are transient and eligible for backoff retry inside the adapter.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pull request collection failed: {0}")]
    Collection(String),

    #[error("Linkage resolution failed for PR #{pr}: {message}")]
    Resolution { pr: u64, message: String },

    #[error("Mutation failed for item {item}: {message}")]
    Mutation { item: String, message: String },

    #[error("Rate limited by the GitHub API{}", format_retry_after(.retry_after_secs))]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("GitHub API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("GraphQL error: {0}")]
    Graphql(String),
}

impl EngineError {
    /// Whether the error is safe to retry after backoff.
    ///
    /// Rate limits, network/timeout failures, and 5xx responses are
    /// transient. 4xx responses (auth, permissions, bad queries) and
    /// GraphQL-level errors are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport(_) => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        EngineError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Graphql(format!("response did not match expected shape: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_is_transient() {
        assert!(EngineError::RateLimited { retry_after_secs: Some(30) }.is_transient());
        assert!(EngineError::RateLimited { retry_after_secs: None }.is_transient());
    }

    #[test]
    fn test_server_errors_are_transient() {
        assert!(EngineError::Api { status: 500, message: String::new() }.is_transient());
        assert!(EngineError::Api { status: 502, message: String::new() }.is_transient());
        assert!(EngineError::Transport("connection reset".to_string()).is_transient());
    }

    #[test]
    fn test_client_errors_are_permanent() {
        assert!(!EngineError::Api { status: 401, message: String::new() }.is_transient());
        assert!(!EngineError::Api { status: 403, message: String::new() }.is_transient());
        assert!(!EngineError::Api { status: 404, message: String::new() }.is_transient());
        assert!(!EngineError::Graphql("bad query".to_string()).is_transient());
        assert!(!EngineError::Config("missing token".to_string()).is_transient());
    }

    #[test]
    fn test_display_includes_context() {
        let err = EngineError::Resolution { pr: 123, message: "lookup failed".to_string() };
        assert!(err.to_string().contains("#123"));

        let err = EngineError::RateLimited { retry_after_secs: Some(60) };
        assert!(err.to_string().contains("60s"));
    }
}
