//! Action executor.
//!
//! Applies reconciliation decisions against the board port. The only
//! component with mutation side effects; in dry-run mode it produces the
//! same decision trace while touching nothing.

use std::sync::Arc;

use crate::domain::errors::EngineResult;
use crate::domain::models::{ReconcileAction, ReconciliationDecision, StatusTarget};
use crate::domain::ports::ProjectBoard;
use crate::services::reconciler::comment_body;

use serde::{Deserialize, Serialize};

/// What happened when a decision was applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Decision applied against the external board.
    Applied,
    /// Decision computed but suppressed by dry-run mode.
    DryRun,
    /// Nothing to do (duplicate suppressed).
    Noop,
    /// A mutation failed; the message records which step and why.
    Failed(String),
}

impl std::fmt::Display for ItemOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemOutcome::Applied => write!(f, "applied"),
            ItemOutcome::DryRun => write!(f, "dry-run"),
            ItemOutcome::Noop => write!(f, "no-op"),
            ItemOutcome::Failed(msg) => write!(f, "failed: {msg}"),
        }
    }
}

/// Applies decisions: status mutations and traceability comments.
pub struct ActionExecutor {
    board: Arc<dyn ProjectBoard>,
    target: StatusTarget,
    target_status: String,
    dry_run: bool,
}

impl ActionExecutor {
    pub fn new(
        board: Arc<dyn ProjectBoard>,
        target: StatusTarget,
        target_status: impl Into<String>,
        dry_run: bool,
    ) -> Self {
        Self { board, target, target_status: target_status.into(), dry_run }
    }

    /// Apply one decision. Mutation failures are reported in the outcome,
    /// never propagated: a single item must not abort the run.
    pub async fn apply(&self, decision: &ReconciliationDecision) -> ItemOutcome {
        let item = &decision.item;
        let pr = &decision.triggering_pr;

        tracing::info!(
            pr = pr.number,
            issue = item.issue_number,
            item = %item.item_id,
            action = %decision.action,
            dry_run = self.dry_run,
            "Reconciliation decision"
        );

        match decision.action {
            ReconcileAction::None => ItemOutcome::Noop,

            ReconcileAction::CommentOnly => {
                if self.dry_run {
                    return ItemOutcome::DryRun;
                }
                match self.comment(decision).await {
                    Ok(()) => ItemOutcome::Applied,
                    Err(err) => {
                        tracing::error!(issue = item.issue_number, error = %err, "Comment creation failed");
                        ItemOutcome::Failed(format!("comment: {err}"))
                    }
                }
            }

            ReconcileAction::StatusAndComment => {
                if self.dry_run {
                    return ItemOutcome::DryRun;
                }
                if let Err(err) = self.board.set_item_status(&self.target, &item.item_id).await {
                    tracing::error!(issue = item.issue_number, error = %err, "Status mutation failed");
                    return ItemOutcome::Failed(format!("status: {err}"));
                }
                tracing::info!(
                    issue = item.issue_number,
                    status = %self.target_status,
                    "Status updated"
                );
                // The status mutation is not rolled back if the comment
                // fails: a missing comment is cosmetic, a stuck status is
                // not. The next run will not re-fire the status change.
                match self.comment(decision).await {
                    Ok(()) => ItemOutcome::Applied,
                    Err(err) => {
                        tracing::error!(issue = item.issue_number, error = %err, "Comment creation failed after status update");
                        ItemOutcome::Failed(format!("comment after status update: {err}"))
                    }
                }
            }
        }
    }

    async fn comment(&self, decision: &ReconciliationDecision) -> EngineResult<()> {
        let body = comment_body(&decision.triggering_pr);
        self.board.add_comment(&decision.item.issue_id, &body).await
    }
}
