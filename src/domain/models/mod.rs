pub mod config;
pub mod decision;
pub mod project_item;
pub mod pull_request;

pub use config::{
    Config, GitHubConfig, LoggingConfig, OwnerType, ProjectConfig, RateLimitConfig, RetryConfig,
};
pub use decision::{ReconcileAction, ReconciliationDecision};
pub use project_item::{BoardSchema, ProjectItem, StatusOption, StatusTarget};
pub use pull_request::{IssueComment, IssueRef, IssueState, LinkedIssue, MergeState, PullRequest};
