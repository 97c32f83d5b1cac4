//! Herald - GitHub Project board reconciliation for merged pull requests
//!
//! Herald watches a repository for pull requests merged into a designated
//! branch and moves every project item (issue) linked by those PRs to a
//! configured status ("QA Testing"), leaving a traceability comment per
//! qualifying merge. Reconciliation is idempotent: re-running against an
//! already-updated board changes nothing, because duplicate-avoidance is
//! derived from the board's own comment history rather than local state.
//!
//! # Architecture
//!
//! The crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, error taxonomy, and port traits
//! - **Service Layer** (`services`): collector → resolver → reconciler →
//!   executor pipeline and the run engine
//! - **Adapters** (`adapters`): GitHub GraphQL implementations of the ports
//! - **Infrastructure** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! The reconciler itself is a pure function; everything external reaches
//! it through the `PullRequestSource` and `ProjectBoard` ports, so the
//! whole engine can be driven by in-memory fakes in tests.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{EngineError, EngineResult};
pub use domain::models::{
    BoardSchema, Config, IssueComment, IssueRef, IssueState, LinkedIssue, MergeState,
    ProjectItem, PullRequest, ReconcileAction, ReconciliationDecision, StatusTarget,
};
pub use domain::ports::{ProjectBoard, PullRequestSource};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{EngineSettings, ItemOutcome, ReconciliationEngine, RunSummary};
