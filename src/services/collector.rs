//! Merge event collector.
//!
//! Produces the candidate set of pull requests for one run: everything
//! merged into the configured branch, ordered by merge time ascending.
//! This is the single branch-filter point in the pipeline; downstream
//! components never re-check the branch.

use std::sync::Arc;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::PullRequest;
use crate::domain::ports::PullRequestSource;

/// Collects merged pull requests for the configured target branch.
pub struct MergeEventCollector {
    source: Arc<dyn PullRequestSource>,
    target_branch: String,
}

impl MergeEventCollector {
    pub fn new(source: Arc<dyn PullRequestSource>, target_branch: impl Into<String>) -> Self {
        Self { source, target_branch: target_branch.into() }
    }

    /// Collect the candidate pull requests, oldest merge first.
    ///
    /// Source failures (after the adapter's own bounded retries) are
    /// fatal: without a complete candidate set the run cannot proceed.
    pub async fn collect(&self) -> EngineResult<Vec<PullRequest>> {
        let fetched = self
            .source
            .merged_pull_requests(&self.target_branch)
            .await
            .map_err(|err| EngineError::Collection(err.to_string()))?;

        let total = fetched.len();
        let mut candidates: Vec<PullRequest> = fetched
            .into_iter()
            .filter(|pr| pr.merged_into(&self.target_branch))
            .collect();

        // The listing API orders by update recency; reconciliation wants
        // merge order so multi-PR accumulation comments read chronologically.
        candidates.sort_by_key(|pr| pr.merged_at);

        tracing::info!(
            branch = %self.target_branch,
            candidates = candidates.len(),
            fetched = total,
            "Collected merged pull requests"
        );

        Ok(candidates)
    }
}
