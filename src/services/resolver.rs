//! Issue linkage resolver.
//!
//! Maps a pull request to the project items it links. References are
//! extracted from the PR body text (`#123`, `repo#456`, `org/repo#789`),
//! resolved to issues, and filtered to open issues with an item in the
//! configured project. A PR with zero links resolves to an empty set.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::{IssueRef, IssueState, ProjectItem, PullRequest};
use crate::domain::ports::ProjectBoard;

/// Resolves the set of project items a pull request links.
pub struct IssueLinkageResolver {
    board: Arc<dyn ProjectBoard>,
    project_number: u64,
}

impl IssueLinkageResolver {
    pub fn new(board: Arc<dyn ProjectBoard>, project_number: u64) -> Self {
        Self { board, project_number }
    }

    /// Resolve the linked project items for one pull request,
    /// deduplicated by item id.
    ///
    /// Unresolvable references, closed issues, and issues with no item in
    /// the configured project are logged and skipped. Board lookup
    /// failures abort resolution for this PR only (`Resolution` error);
    /// the engine continues with the remaining PRs.
    pub async fn resolve(&self, pr: &PullRequest) -> EngineResult<Vec<ProjectItem>> {
        let refs = extract_issue_refs(&pr.body);
        if refs.is_empty() {
            tracing::debug!(pr = pr.number, "PR has no referenced issues");
            return Ok(Vec::new());
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut items = Vec::new();

        for issue_ref in refs {
            let issue = match self.board.resolve_issue(&issue_ref).await {
                Ok(Some(issue)) => issue,
                Ok(None) => {
                    tracing::warn!(pr = pr.number, reference = %issue_ref, "Could not resolve issue reference");
                    continue;
                }
                Err(err) => return Err(resolution_error(pr, err)),
            };

            if issue.state != IssueState::Open {
                tracing::info!(pr = pr.number, issue = issue.number, "Skipping closed issue");
                continue;
            }

            let candidates = match self.board.project_items(&issue).await {
                Ok(candidates) => candidates,
                Err(err) => return Err(resolution_error(pr, err)),
            };

            let Some(item) = candidates
                .into_iter()
                .find(|item| item.project_number == self.project_number)
            else {
                tracing::debug!(
                    pr = pr.number,
                    issue = issue.number,
                    project = self.project_number,
                    "Issue has no item in the configured project"
                );
                continue;
            };

            if seen.insert(item.item_id.clone()) {
                items.push(item);
            }
        }

        tracing::debug!(pr = pr.number, items = items.len(), "Resolved linked project items");
        Ok(items)
    }
}

fn resolution_error(pr: &PullRequest, err: EngineError) -> EngineError {
    EngineError::Resolution { pr: pr.number, message: err.to_string() }
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Extract issue references from body text.
///
/// Recognises `#123`, `repo#456`, and `org/repo#789`, in order of
/// appearance, deduplicated. A `#` with no trailing digits is ignored.
pub fn extract_issue_refs(text: &str) -> Vec<IssueRef> {
    let bytes = text.as_bytes();
    let mut seen = HashSet::new();
    let mut refs = Vec::new();

    for (hash_idx, _) in text.match_indices('#') {
        let digits: String = text[hash_idx + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        let Ok(number) = digits.parse::<u64>() else { continue };

        // Scan backwards over word characters for an optional repo name,
        // then over a single '/' for an optional owner.
        let mut repo_start = hash_idx;
        while repo_start > 0 && is_word_byte(bytes[repo_start - 1]) {
            repo_start -= 1;
        }
        let repo = &text[repo_start..hash_idx];

        let (owner, repo) = if repo.is_empty() {
            (None, None)
        } else if repo_start > 0 && bytes[repo_start - 1] == b'/' {
            let mut owner_start = repo_start - 1;
            while owner_start > 0 && is_word_byte(bytes[owner_start - 1]) {
                owner_start -= 1;
            }
            let owner = &text[owner_start..repo_start - 1];
            if owner.is_empty() {
                (None, Some(repo.to_string()))
            } else {
                (Some(owner.to_string()), Some(repo.to_string()))
            }
        } else {
            (None, Some(repo.to_string()))
        };

        let issue_ref = IssueRef { owner, repo, number };
        if seen.insert(issue_ref.clone()) {
            refs.push(issue_ref);
        }
    }

    refs
}
