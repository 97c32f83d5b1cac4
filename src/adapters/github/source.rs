//! Pull request source over the GitHub GraphQL API.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::PullRequest;
use crate::domain::ports::PullRequestSource;

use super::client::GraphqlClient;
use super::models::{MergedPullRequestsData, PullRequestNode};
use super::queries;

/// [`PullRequestSource`] implementation that lists merged pull requests
/// from one repository, traversing every page of the listing.
#[derive(Debug)]
pub struct GithubPullRequestSource {
    client: Arc<GraphqlClient>,
    owner: String,
    repo: String,
}

impl GithubPullRequestSource {
    pub fn new(client: Arc<GraphqlClient>, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self { client, owner: owner.into(), repo: repo.into() }
    }

    fn to_pull_request(node: PullRequestNode) -> PullRequest {
        PullRequest {
            id: node.id,
            number: node.number,
            title: node.title,
            body: node.body_text.unwrap_or_default(),
            base_branch: node.base_ref_name,
            state: node.state,
            merged_at: node.merged_at,
            url: node.url,
        }
    }
}

#[async_trait]
impl PullRequestSource for GithubPullRequestSource {
    async fn merged_pull_requests(&self, base_branch: &str) -> EngineResult<Vec<PullRequest>> {
        let mut pull_requests = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: MergedPullRequestsData = self
                .client
                .post(
                    queries::MERGED_PULL_REQUESTS,
                    serde_json::json!({
                        "owner": self.owner,
                        "repo": self.repo,
                        "branch": base_branch,
                        "cursor": cursor,
                    }),
                )
                .await?;

            let connection = data
                .repository
                .ok_or_else(|| {
                    EngineError::Collection(format!(
                        "repository {}/{} not found or not accessible",
                        self.owner, self.repo
                    ))
                })?
                .pull_requests;

            pull_requests.extend(connection.nodes.into_iter().map(Self::to_pull_request));

            if !connection.page_info.has_next_page {
                break;
            }
            cursor = connection.page_info.end_cursor;
        }

        tracing::debug!(
            owner = %self.owner,
            repo = %self.repo,
            branch = base_branch,
            count = pull_requests.len(),
            "Listed merged pull requests"
        );

        Ok(pull_requests)
    }
}
