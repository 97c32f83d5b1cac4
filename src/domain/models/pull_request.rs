//! Pull request and issue reference models.
//!
//! These are the query-side domain types. A [`PullRequest`] is immutable
//! once fetched; [`IssueRef`] is a textual reference extracted from a PR
//! body (`#123`, `repo#456`, or `org/repo#789`), resolved to a
//! [`LinkedIssue`] by the board adapter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Merge state of a pull request as reported by GitHub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MergeState {
    Open,
    Closed,
    Merged,
}

impl std::fmt::Display for MergeState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeState::Open => write!(f, "open"),
            MergeState::Closed => write!(f, "closed"),
            MergeState::Merged => write!(f, "merged"),
        }
    }
}

/// A pull request candidate for reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    /// GraphQL node id.
    pub id: String,
    /// Sequential number within the repository.
    pub number: u64,
    /// PR title, used only for logging.
    pub title: String,
    /// Plain-text PR body; linked issues are extracted from it.
    pub body: String,
    /// The branch this PR targets.
    pub base_branch: String,
    /// Merge state; only `Merged` PRs are reconciled.
    pub state: MergeState,
    /// When the PR merged. `None` while unmerged.
    pub merged_at: Option<DateTime<Utc>>,
    /// URL to view the PR, embedded in traceability comments.
    pub url: String,
}

impl PullRequest {
    /// Whether this PR merged into the given branch.
    pub fn merged_into(&self, branch: &str) -> bool {
        self.state == MergeState::Merged && self.base_branch == branch
    }
}

/// State of an issue underlying a project item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueState {
    Open,
    Closed,
}

/// A textual issue reference found in a PR body.
///
/// `owner` and `repo` are `None` for same-repository references; the
/// resolver substitutes the configured repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub number: u64,
}

impl std::fmt::Display for IssueRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => write!(f, "{owner}/{repo}#{}", self.number),
            (None, Some(repo)) => write!(f, "{repo}#{}", self.number),
            _ => write!(f, "#{}", self.number),
        }
    }
}

/// An issue resolved from an [`IssueRef`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedIssue {
    /// GraphQL node id of the issue.
    pub id: String,
    /// Issue number within its repository.
    pub number: u64,
    /// Current open/closed state; closed issues are not reconciled.
    pub state: IssueState,
    /// URL to view the issue in the GitHub UI.
    pub url: String,
}

/// A comment on an issue thread.
///
/// Duplicate-avoidance inspects these rather than any local state: the
/// board's comment list is the source of truth across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueComment {
    pub body: String,
    pub created_at: DateTime<Utc>,
}
