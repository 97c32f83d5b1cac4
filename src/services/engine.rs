//! Reconciliation engine: one full pass over merged pull requests.
//!
//! Wires the collector, resolver, pure reconciler, and executor for a
//! single scheduler-triggered invocation, and aggregates the per-item
//! outcomes into a [`RunSummary`]. The engine is stateless across runs;
//! everything it needs is re-fetched from the board.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::{Config, ReconcileAction};
use crate::domain::ports::{ProjectBoard, PullRequestSource};
use crate::services::collector::MergeEventCollector;
use crate::services::executor::{ActionExecutor, ItemOutcome};
use crate::services::reconciler;
use crate::services::resolver::IssueLinkageResolver;

/// The engine inputs derived from configuration.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub target_branch: String,
    pub project_number: u64,
    pub target_status: String,
    pub dry_run: bool,
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            target_branch: config.target_branch.clone(),
            project_number: config.project.number,
            target_status: config.project.target_status.clone(),
            dry_run: config.dry_run,
        }
    }
}

/// One (pull request, item) decision and what happened to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub pr_number: u64,
    pub issue_number: u64,
    pub item_id: String,
    pub action: ReconcileAction,
    pub outcome: ItemOutcome,
}

/// A pull request whose linkage could not be resolved this run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedPullRequest {
    pub pr_number: u64,
    pub reason: String,
}

/// Aggregated result of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub dry_run: bool,
    pub pull_requests: usize,
    pub records: Vec<DecisionRecord>,
    pub skipped_prs: Vec<SkippedPullRequest>,
}

impl RunSummary {
    fn new(run_id: Uuid, dry_run: bool) -> Self {
        Self { run_id, dry_run, pull_requests: 0, records: Vec::new(), skipped_prs: Vec::new() }
    }

    /// Decisions applied against the board (or suppressed only by dry-run).
    pub fn applied(&self) -> usize {
        self.records.iter().filter(|r| r.outcome == ItemOutcome::Applied).count()
    }

    /// Decisions computed but suppressed by dry-run mode.
    pub fn planned(&self) -> usize {
        self.records.iter().filter(|r| r.outcome == ItemOutcome::DryRun).count()
    }

    /// Duplicate-suppressed no-ops.
    pub fn noops(&self) -> usize {
        self.records.iter().filter(|r| r.outcome == ItemOutcome::Noop).count()
    }

    /// Items whose mutation (or comment read) failed this run.
    pub fn failed(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, ItemOutcome::Failed(_)))
            .count()
    }

    /// The decision trace: (PR, issue, action) triples in processing order.
    ///
    /// Dry-run and live runs over identical inputs produce identical traces.
    pub fn decision_trace(&self) -> Vec<(u64, u64, ReconcileAction)> {
        self.records
            .iter()
            .map(|r| (r.pr_number, r.issue_number, r.action))
            .collect()
    }
}

/// Drives one reconciliation pass.
pub struct ReconciliationEngine {
    source: Arc<dyn PullRequestSource>,
    board: Arc<dyn ProjectBoard>,
    settings: EngineSettings,
}

impl ReconciliationEngine {
    pub fn new(
        source: Arc<dyn PullRequestSource>,
        board: Arc<dyn ProjectBoard>,
        settings: EngineSettings,
    ) -> Self {
        Self { source, board, settings }
    }

    /// Run one pass. Fatal errors (`Config`, `Collection`) abort the run;
    /// everything else is recorded in the summary and the run continues.
    pub async fn run(&self) -> EngineResult<RunSummary> {
        let run_id = Uuid::new_v4();
        let mut summary = RunSummary::new(run_id, self.settings.dry_run);

        tracing::info!(
            %run_id,
            branch = %self.settings.target_branch,
            project = self.settings.project_number,
            dry_run = self.settings.dry_run,
            "Reconciliation run started"
        );

        let collector =
            MergeEventCollector::new(self.source.clone(), self.settings.target_branch.clone());
        let pull_requests = collector.collect().await?;
        summary.pull_requests = pull_requests.len();

        if pull_requests.is_empty() {
            tracing::info!(%run_id, "No merged pull requests to reconcile");
            return Ok(summary);
        }

        let schema = self.board.board_schema().await.map_err(|err| match err {
            config @ EngineError::Config(_) => config,
            other => EngineError::Collection(format!("board schema fetch failed: {other}")),
        })?;
        let target = schema.target(&self.settings.target_status).ok_or_else(|| {
            EngineError::Config(format!(
                "status field has no option named '{}'",
                self.settings.target_status
            ))
        })?;

        let resolver =
            IssueLinkageResolver::new(self.board.clone(), self.settings.project_number);
        let executor = ActionExecutor::new(
            self.board.clone(),
            target,
            self.settings.target_status.clone(),
            self.settings.dry_run,
        );

        for pr in &pull_requests {
            let items = match resolver.resolve(pr).await {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(pr = pr.number, error = %err, "Skipping pull request");
                    summary
                        .skipped_prs
                        .push(SkippedPullRequest { pr_number: pr.number, reason: err.to_string() });
                    continue;
                }
            };

            for item in items {
                let comments = match self.board.existing_comments(&item.issue_id).await {
                    Ok(comments) => comments,
                    Err(err) => {
                        tracing::warn!(
                            pr = pr.number,
                            issue = item.issue_number,
                            error = %err,
                            "Comment lookup failed; skipping item"
                        );
                        summary.records.push(DecisionRecord {
                            pr_number: pr.number,
                            issue_number: item.issue_number,
                            item_id: item.item_id.clone(),
                            action: ReconcileAction::None,
                            outcome: ItemOutcome::Failed(format!("comment lookup: {err}")),
                        });
                        continue;
                    }
                };

                let decision =
                    reconciler::decide(&item, pr, &comments, &self.settings.target_status);
                let outcome = executor.apply(&decision).await;

                summary.records.push(DecisionRecord {
                    pr_number: pr.number,
                    issue_number: item.issue_number,
                    item_id: item.item_id,
                    action: decision.action,
                    outcome,
                });
            }
        }

        tracing::info!(
            %run_id,
            pull_requests = summary.pull_requests,
            applied = summary.applied(),
            planned = summary.planned(),
            noops = summary.noops(),
            failed = summary.failed(),
            skipped_prs = summary.skipped_prs.len(),
            "Reconciliation run finished"
        );

        Ok(summary)
    }
}
