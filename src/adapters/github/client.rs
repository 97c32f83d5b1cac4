//! GitHub GraphQL client with rate limiting and bounded retry.
//!
//! Wraps the GraphQL endpoint (public or enterprise) behind one typed
//! `post` method. Includes a token-bucket rate limiter and a jittered
//! exponential-backoff retry policy for transient failures (5xx, rate
//! limits, network errors); 4xx auth/permission errors surface
//! immediately without retry.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use backoff::ExponentialBackoffBuilder;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::{GitHubConfig, RateLimitConfig, RetryConfig};

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets and a token becomes available.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: u32,
    tokens: u32,
    window: Duration,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a new rate limiter with the given capacity and window.
    pub fn new(capacity: u32, window: Duration) -> Self {
        Self { capacity, tokens: capacity, window, window_start: Instant::now() }
    }

    /// Derive a limiter from configuration: `burst_size` tokens per the
    /// window that sustains `requests_per_second` on average.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let window =
            Duration::from_secs_f64(f64::from(config.burst_size) / config.requests_per_second);
        Self::new(config.burst_size, window)
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::warn!(
                sleep_ms = remaining.as_millis() as u64,
                "Request budget exhausted, sleeping until the window resets"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }
}

#[derive(Debug, Deserialize)]
struct GraphqlEnvelope {
    data: Option<serde_json::Value>,
    errors: Option<Vec<GraphqlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    message: String,
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// HTTP client for the GitHub GraphQL API.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: Client,
    endpoint: String,
    token: String,
    retry: RetryConfig,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl GraphqlClient {
    /// Build a client from configuration. The access token must already
    /// be resolved (config file or `GITHUB_TOKEN`).
    pub fn new(
        github: &GitHubConfig,
        rate_limit: &RateLimitConfig,
        retry: &RetryConfig,
        token: String,
    ) -> EngineResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(github.timeout_secs))
            .build()
            .map_err(|err| EngineError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            endpoint: github.endpoint(),
            token,
            retry: retry.clone(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::from_config(rate_limit))),
        })
    }

    /// Execute a GraphQL document and deserialize the `data` payload.
    ///
    /// Transient failures are retried up to `retry.max_retries` attempts
    /// with jittered exponential backoff. `NOT_FOUND` GraphQL errors are
    /// tolerated when partial data is present, so lookups can report
    /// missing entities as `None` instead of failing the call.
    pub async fn post<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> EngineResult<T> {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.retry.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.retry.max_backoff_ms))
            .with_max_elapsed_time(None)
            .build();

        let attempts = AtomicU32::new(0);
        let data = backoff::future::retry(policy, || {
            let variables = variables.clone();
            let attempts = &attempts;
            async move {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                match self.execute_once(query, variables).await {
                    Ok(data) => Ok(data),
                    Err(err) if err.is_transient() && attempt < self.retry.max_retries => {
                        tracing::warn!(attempt, error = %err, "Transient GraphQL failure, will retry");
                        if let EngineError::RateLimited { retry_after_secs: Some(secs) } = &err {
                            let retry_after = Some(Duration::from_secs(*secs));
                            return Err(backoff::Error::Transient {
                                err,
                                retry_after,
                            });
                        }
                        Err(backoff::Error::transient(err))
                    }
                    Err(err) => Err(backoff::Error::permanent(err)),
                }
            }
        })
        .await?;

        Ok(serde_json::from_value(data)?)
    }

    async fn execute_once(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> EngineResult<serde_json::Value> {
        self.rate_limiter.lock().await.acquire().await;

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("User-Agent", "herald")
            .json(&serde_json::json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            let retry_after_secs = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(EngineError::RateLimited { retry_after_secs });
        }
        if status.as_u16() == 403 {
            let remaining = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            if remaining == Some("0") {
                return Err(EngineError::RateLimited { retry_after_secs: None });
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Api { status: status.as_u16(), message: body });
        }

        let envelope: GraphqlEnvelope = response.json().await?;

        if let Some(errors) = envelope.errors.filter(|e| !e.is_empty()) {
            if errors.iter().any(|e| e.kind.as_deref() == Some("RATE_LIMITED")) {
                return Err(EngineError::RateLimited { retry_after_secs: None });
            }
            let only_not_found =
                errors.iter().all(|e| e.kind.as_deref() == Some("NOT_FOUND"));
            if !(only_not_found && envelope.data.is_some()) {
                let messages: Vec<&str> =
                    errors.iter().map(|e| e.message.as_str()).collect();
                return Err(EngineError::Graphql(messages.join("; ")));
            }
        }

        envelope
            .data
            .ok_or_else(|| EngineError::Graphql("response carried no data".to_string()))
    }
}
