//! Project board query and command port.

use async_trait::async_trait;

use crate::domain::errors::EngineResult;
use crate::domain::models::{
    BoardSchema, IssueComment, IssueRef, LinkedIssue, ProjectItem, StatusTarget,
};

/// Port for everything the engine needs from the project board side:
/// issue resolution, item lookup, schema discovery, comment listing, and
/// the two mutations (status update, comment creation).
///
/// All reads return live external state — duplicate-avoidance is derived
/// from `existing_comments` on every run rather than from local history.
#[async_trait]
pub trait ProjectBoard: Send + Sync {
    /// Resolve a textual issue reference to an issue, or `None` if the
    /// referenced issue does not exist.
    async fn resolve_issue(&self, issue_ref: &IssueRef) -> EngineResult<Option<LinkedIssue>>;

    /// List the project items of an issue across all projects it appears
    /// in, with the current value of the configured status field.
    async fn project_items(&self, issue: &LinkedIssue) -> EngineResult<Vec<ProjectItem>>;

    /// Fetch the board schema (status field id and option ids) for the
    /// configured project.
    async fn board_schema(&self) -> EngineResult<BoardSchema>;

    /// List all comments on an issue thread.
    async fn existing_comments(&self, issue_id: &str) -> EngineResult<Vec<IssueComment>>;

    /// Set the status field of `item_id` to the target option.
    async fn set_item_status(&self, target: &StatusTarget, item_id: &str) -> EngineResult<()>;

    /// Create a comment on an issue thread.
    async fn add_comment(&self, issue_id: &str, body: &str) -> EngineResult<()>;
}
