//! Property-based tests for the reconciler's idempotence guarantees.
//!
//! Strategy: generate arbitrary board states (status value, comment
//! history, triggering PR), apply `decide`, simulate the executor's
//! effect on external state, and verify that replaying `decide` on the
//! post-state converges to NONE.

use chrono::Utc;
use proptest::prelude::*;

use herald::domain::models::{
    IssueComment, IssueState, MergeState, ProjectItem, PullRequest, ReconcileAction,
};
use herald::services::reconciler::{comment_body, decide};

const TARGET: &str = "QA Testing";

fn arb_status() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Backlog".to_string())),
        Just(Some("In Progress".to_string())),
        Just(Some("Done".to_string())),
        Just(Some(TARGET.to_string())),
    ]
}

fn arb_pr_number() -> impl Strategy<Value = u64> {
    1u64..10_000
}

fn pull_request(number: u64) -> PullRequest {
    PullRequest {
        id: format!("PR_{number}"),
        number,
        title: format!("Change #{number}"),
        body: format!("Fixes #{number}"),
        base_branch: "dev".to_string(),
        state: MergeState::Merged,
        merged_at: Some(Utc::now()),
        url: format!("https://github.com/org/repo/pull/{number}"),
    }
}

fn item(status: Option<String>) -> ProjectItem {
    ProjectItem {
        item_id: "PVTI_1".to_string(),
        project_number: 3,
        issue_id: "ISS_1".to_string(),
        issue_number: 42,
        issue_state: IssueState::Open,
        status,
    }
}

fn comment(body: String) -> IssueComment {
    IssueComment { body, created_at: Utc::now() }
}

/// Mimic the executor: produce the post-mutation state for a decision.
fn apply(
    decision_action: ReconcileAction,
    item_before: &ProjectItem,
    comments_before: &[IssueComment],
    pr: &PullRequest,
) -> (ProjectItem, Vec<IssueComment>) {
    let mut item_after = item_before.clone();
    let mut comments_after = comments_before.to_vec();
    match decision_action {
        ReconcileAction::None => {}
        ReconcileAction::CommentOnly => comments_after.push(comment(comment_body(pr))),
        ReconcileAction::StatusAndComment => {
            item_after.status = Some(TARGET.to_string());
            comments_after.push(comment(comment_body(pr)));
        }
    }
    (item_after, comments_after)
}

proptest! {
    /// After applying any decision, replaying the same (PR, item) pair
    /// decides NONE — the engine converges in one step.
    #[test]
    fn replay_converges_to_none(
        status in arb_status(),
        pr_number in arb_pr_number(),
        other_pr_numbers in prop::collection::vec(1u64..10_000, 0..5),
    ) {
        let pr = pull_request(pr_number);
        let history: Vec<IssueComment> = other_pr_numbers
            .iter()
            .map(|n| comment(comment_body(&pull_request(*n))))
            .collect();

        let before = item(status);
        let first = decide(&before, &pr, &history, TARGET);
        let (after, history_after) = apply(first.action, &before, &history, &pr);

        let replay = decide(&after, &pr, &history_after, TARGET);
        prop_assert_eq!(replay.action, ReconcileAction::None);
    }

    /// The status mutation fires only from the not-at-target state, and
    /// always together with a comment.
    #[test]
    fn status_mutation_only_from_non_target_state(
        status in arb_status(),
        pr_number in arb_pr_number(),
    ) {
        let pr = pull_request(pr_number);
        let decision = decide(&item(status.clone()), &pr, &[], TARGET);

        if status.as_deref() == Some(TARGET) {
            prop_assert_ne!(decision.action, ReconcileAction::StatusAndComment);
        } else {
            prop_assert_eq!(decision.action, ReconcileAction::StatusAndComment);
        }
    }

    /// Comments from unrelated PRs never suppress this PR's comment.
    #[test]
    fn unrelated_comments_do_not_suppress(
        pr_number in arb_pr_number(),
        other in arb_pr_number(),
    ) {
        prop_assume!(pr_number != other);
        let pr = pull_request(pr_number);
        let history = vec![comment(comment_body(&pull_request(other)))];

        let decision = decide(&item(Some(TARGET.to_string())), &pr, &history, TARGET);
        prop_assert_eq!(decision.action, ReconcileAction::CommentOnly);
    }
}
