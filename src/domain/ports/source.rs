//! Pull request query port.

use async_trait::async_trait;

use crate::domain::errors::EngineResult;
use crate::domain::models::PullRequest;

/// Port for the pull-request query capability.
///
/// The engine discovers merge events exclusively through this trait; the
/// GitHub adapter implements it over GraphQL, and tests implement it with
/// in-memory fixtures. Implementations own pagination: a call returns the
/// complete result set, not one page.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// List pull requests merged into `base_branch`.
    ///
    /// Implementations may return extra entries (e.g. a provider that
    /// cannot filter server-side); the collector re-checks merge state and
    /// branch, so over-reporting is safe and under-reporting is not.
    async fn merged_pull_requests(&self, base_branch: &str) -> EngineResult<Vec<PullRequest>>;
}
