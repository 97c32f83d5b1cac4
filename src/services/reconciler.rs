//! Status reconciler: the pure decision function.
//!
//! `decide` maps one (project item, triggering PR, comment history) triple
//! to the action required. It performs no I/O and holds no state, which is
//! what makes the engine idempotent under a polling scheduler: the same
//! merged PR observed across many runs keeps producing the same decisions
//! until the board's own state (status value, comment presence) marks the
//! work done.

use crate::domain::models::{
    IssueComment, ProjectItem, PullRequest, ReconcileAction, ReconciliationDecision,
};

/// Fixed-format traceability comment for a triggering PR.
///
/// The body doubles as the duplicate-avoidance key: a comment containing
/// this exact text for a given PR means that (PR, item) pair is handled.
pub fn comment_body(pr: &PullRequest) -> String {
    format!(
        "Testing will be available in 15 minutes (triggered by [PR #{}]({}))",
        pr.number, pr.url
    )
}

/// Whether the comment history already contains the traceability comment
/// for `pr`.
fn comment_exists(existing: &[IssueComment], pr: &PullRequest) -> bool {
    let marker = comment_body(pr);
    existing.iter().any(|c| c.body.contains(&marker))
}

/// Decide the action for one (item, triggering PR) pair.
///
/// Rules, in order:
/// 1. Item already at `target_status`: comment if this PR hasn't commented
///    yet, otherwise nothing. Status is never touched again once reached.
/// 2. Otherwise: move the status and comment, always together.
pub fn decide(
    item: &ProjectItem,
    triggering_pr: &PullRequest,
    existing_comments: &[IssueComment],
    target_status: &str,
) -> ReconciliationDecision {
    let action = if item.has_status(target_status) {
        if comment_exists(existing_comments, triggering_pr) {
            ReconcileAction::None
        } else {
            ReconcileAction::CommentOnly
        }
    } else {
        ReconcileAction::StatusAndComment
    };

    ReconciliationDecision {
        item: item.clone(),
        action,
        triggering_pr: triggering_pr.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{IssueState, MergeState};
    use chrono::Utc;

    const TARGET: &str = "QA Testing";

    fn pr(number: u64) -> PullRequest {
        PullRequest {
            id: format!("PR_{number}"),
            number,
            title: format!("Change #{number}"),
            body: String::new(),
            base_branch: "dev".to_string(),
            state: MergeState::Merged,
            merged_at: Some(Utc::now()),
            url: format!("https://github.com/org/repo/pull/{number}"),
        }
    }

    fn item(status: Option<&str>) -> ProjectItem {
        ProjectItem {
            item_id: "PVTI_1".to_string(),
            project_number: 3,
            issue_id: "ISS_1".to_string(),
            issue_number: 42,
            issue_state: IssueState::Open,
            status: status.map(str::to_string),
        }
    }

    fn comment_for(pr: &PullRequest) -> IssueComment {
        IssueComment { body: comment_body(pr), created_at: Utc::now() }
    }

    // ── comment body template ───────────────────────────────────────────────

    #[test]
    fn test_comment_body_format() {
        assert_eq!(
            comment_body(&pr(123)),
            "Testing will be available in 15 minutes \
             (triggered by [PR #123](https://github.com/org/repo/pull/123))"
        );
    }

    // ── rule 2: not yet at target status ────────────────────────────────────

    #[test]
    fn test_backlog_item_gets_status_and_comment() {
        let decision = decide(&item(Some("Backlog")), &pr(123), &[], TARGET);
        assert_eq!(decision.action, ReconcileAction::StatusAndComment);
        assert_eq!(decision.triggering_pr.number, 123);
    }

    #[test]
    fn test_unset_status_gets_status_and_comment() {
        let decision = decide(&item(None), &pr(123), &[], TARGET);
        assert_eq!(decision.action, ReconcileAction::StatusAndComment);
    }

    #[test]
    fn test_existing_comment_does_not_suppress_status_change() {
        // A stale comment (e.g. the item was moved back out of QA by hand)
        // never blocks the status transition path.
        let trigger = pr(123);
        let history = vec![comment_for(&trigger)];
        let decision = decide(&item(Some("Backlog")), &trigger, &history, TARGET);
        assert_eq!(decision.action, ReconcileAction::StatusAndComment);
    }

    // ── rule 1: already at target status ────────────────────────────────────

    #[test]
    fn test_at_target_without_comment_is_comment_only() {
        let decision = decide(&item(Some(TARGET)), &pr(124), &[], TARGET);
        assert_eq!(decision.action, ReconcileAction::CommentOnly);
    }

    #[test]
    fn test_at_target_with_comment_is_noop() {
        let trigger = pr(124);
        let history = vec![comment_for(&trigger)];
        let decision = decide(&item(Some(TARGET)), &trigger, &history, TARGET);
        assert_eq!(decision.action, ReconcileAction::None);
        assert!(!decision.mutates());
    }

    #[test]
    fn test_comment_matching_is_per_pr() {
        // A comment from PR #1 does not satisfy PR #2's pair.
        let history = vec![comment_for(&pr(1))];
        let decision = decide(&item(Some(TARGET)), &pr(2), &history, TARGET);
        assert_eq!(decision.action, ReconcileAction::CommentOnly);
    }

    #[test]
    fn test_marker_matches_inside_larger_comment() {
        // Duplicate detection is containment, not equality: a quoted or
        // edited comment that still carries the marker counts.
        let trigger = pr(55);
        let history = vec![IssueComment {
            body: format!("> {}\n\nnoted!", comment_body(&trigger)),
            created_at: Utc::now(),
        }];
        let decision = decide(&item(Some(TARGET)), &trigger, &history, TARGET);
        assert_eq!(decision.action, ReconcileAction::None);
    }

    // ── idempotence and replay ──────────────────────────────────────────────

    #[test]
    fn test_replay_after_transition_is_noop() {
        let trigger = pr(123);

        // First run: item in Backlog, no comments.
        let first = decide(&item(Some("Backlog")), &trigger, &[], TARGET);
        assert_eq!(first.action, ReconcileAction::StatusAndComment);

        // Second run: status applied, comment present.
        let history = vec![comment_for(&trigger)];
        let second = decide(&item(Some(TARGET)), &trigger, &history, TARGET);
        assert_eq!(second.action, ReconcileAction::None);

        // Third run: still nothing.
        let third = decide(&item(Some(TARGET)), &trigger, &history, TARGET);
        assert_eq!(third.action, ReconcileAction::None);
    }

    #[test]
    fn test_multi_pr_accumulation() {
        // An item already at QA Testing, linked by two distinct PRs, gets
        // one comment per PR with PR-specific bodies.
        let first = pr(1);
        let second = pr(2);

        let d1 = decide(&item(Some(TARGET)), &first, &[], TARGET);
        assert_eq!(d1.action, ReconcileAction::CommentOnly);

        let history = vec![comment_for(&first)];
        let d2 = decide(&item(Some(TARGET)), &second, &history, TARGET);
        assert_eq!(d2.action, ReconcileAction::CommentOnly);
        assert_ne!(comment_body(&d1.triggering_pr), comment_body(&d2.triggering_pr));

        // Once both commented, both replay to NONE.
        let history = vec![comment_for(&first), comment_for(&second)];
        assert_eq!(decide(&item(Some(TARGET)), &first, &history, TARGET).action, ReconcileAction::None);
        assert_eq!(decide(&item(Some(TARGET)), &second, &history, TARGET).action, ReconcileAction::None);
    }

    #[test]
    fn test_decision_carries_triggering_pr_not_history_pr() {
        let history = vec![comment_for(&pr(1))];
        let decision = decide(&item(Some(TARGET)), &pr(2), &history, TARGET);
        assert_eq!(decision.triggering_pr.number, 2);
        assert!(comment_body(&decision.triggering_pr).contains("PR #2"));
    }
}
