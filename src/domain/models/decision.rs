//! Reconciliation decisions.
//!
//! A [`ReconciliationDecision`] is the ephemeral output of the pure
//! reconciler: what, if anything, must change for one (pull request,
//! project item) pair. The executor is the only component that turns a
//! decision into external mutations.

use serde::{Deserialize, Serialize};

use super::project_item::ProjectItem;
use super::pull_request::PullRequest;

/// The action required for one (pull request, item) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileAction {
    /// Item is at the target status and the triggering PR already commented.
    None,
    /// Item is at the target status; only the traceability comment is missing.
    CommentOnly,
    /// Item is not yet at the target status: move it, then comment.
    StatusAndComment,
}

impl std::fmt::Display for ReconcileAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconcileAction::None => write!(f, "none"),
            ReconcileAction::CommentOnly => write!(f, "comment-only"),
            ReconcileAction::StatusAndComment => write!(f, "status-and-comment"),
        }
    }
}

/// A computed decision for one (pull request, item) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationDecision {
    pub item: ProjectItem,
    pub action: ReconcileAction,
    /// The PR whose merge produced this decision; its number and URL are
    /// what the traceability comment cites.
    pub triggering_pr: PullRequest,
}

impl ReconciliationDecision {
    /// Whether applying this decision performs any external mutation.
    pub fn mutates(&self) -> bool {
        self.action != ReconcileAction::None
    }
}
