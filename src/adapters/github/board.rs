//! Project board adapter over the GitHub GraphQL API.
//!
//! Implements the [`ProjectBoard`] port: issue resolution, project item
//! lookup, board schema discovery, comment listing, and the two
//! mutations. Cross-repository references resolve against their own
//! repository; bare references resolve against the configured one.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::{
    BoardSchema, IssueComment, IssueRef, LinkedIssue, OwnerType, ProjectItem, StatusOption,
    StatusTarget,
};
use crate::domain::ports::ProjectBoard;

use super::client::GraphqlClient;
use super::models::{
    AddCommentData, IssueByNumberData, IssueCommentsData, IssueProjectItemsData,
    ProjectSchemaData, UpdateItemStatusData,
};
use super::queries;

/// [`ProjectBoard`] implementation for GitHub Projects (v2).
#[derive(Debug)]
pub struct GithubProjectBoard {
    client: Arc<GraphqlClient>,
    owner: String,
    repo: String,
    owner_type: OwnerType,
    project_number: u64,
    status_field: String,
}

impl GithubProjectBoard {
    pub fn new(
        client: Arc<GraphqlClient>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        owner_type: OwnerType,
        project_number: u64,
        status_field: impl Into<String>,
    ) -> Self {
        Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
            owner_type,
            project_number,
            status_field: status_field.into(),
        }
    }

    fn mutation_error(item: &str, err: EngineError) -> EngineError {
        match err {
            already @ EngineError::Mutation { .. } => already,
            other => EngineError::Mutation { item: item.to_string(), message: other.to_string() },
        }
    }
}

#[async_trait]
impl ProjectBoard for GithubProjectBoard {
    async fn resolve_issue(&self, issue_ref: &IssueRef) -> EngineResult<Option<LinkedIssue>> {
        let owner = issue_ref.owner.as_deref().unwrap_or(&self.owner);
        let repo = issue_ref.repo.as_deref().unwrap_or(&self.repo);

        let data: IssueByNumberData = self
            .client
            .post(
                queries::ISSUE_BY_NUMBER,
                serde_json::json!({
                    "owner": owner,
                    "repo": repo,
                    "number": issue_ref.number,
                }),
            )
            .await?;

        Ok(data
            .repository
            .and_then(|repository| repository.issue)
            .map(|issue| LinkedIssue {
                id: issue.id,
                number: issue.number,
                state: issue.state,
                url: issue.url,
            }))
    }

    async fn project_items(&self, issue: &LinkedIssue) -> EngineResult<Vec<ProjectItem>> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: IssueProjectItemsData = self
                .client
                .post(
                    queries::ISSUE_PROJECT_ITEMS,
                    serde_json::json!({
                        "issueId": issue.id,
                        "field": self.status_field,
                        "cursor": cursor,
                    }),
                )
                .await?;

            let Some(with_items) = data.node else { break };
            let connection = with_items.project_items;

            items.extend(connection.nodes.into_iter().map(|node| ProjectItem {
                item_id: node.id,
                project_number: node.project.number,
                issue_id: issue.id.clone(),
                issue_number: issue.number,
                issue_state: issue.state,
                status: node.field_value_by_name.and_then(|value| value.name),
            }));

            if !connection.page_info.has_next_page {
                break;
            }
            cursor = connection.page_info.end_cursor;
        }

        Ok(items)
    }

    async fn board_schema(&self) -> EngineResult<BoardSchema> {
        let query = match self.owner_type {
            OwnerType::Organization => queries::ORGANIZATION_PROJECT_SCHEMA,
            OwnerType::User => queries::USER_PROJECT_SCHEMA,
        };

        let data: ProjectSchemaData = self
            .client
            .post(
                query,
                serde_json::json!({
                    "login": self.owner,
                    "number": self.project_number,
                    "field": self.status_field,
                }),
            )
            .await?;

        let project = data
            .owner
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "{} '{}' not found",
                    match self.owner_type {
                        OwnerType::Organization => "organization",
                        OwnerType::User => "user",
                    },
                    self.owner
                ))
            })?
            .project_v2
            .ok_or_else(|| {
                EngineError::Config(format!(
                    "project {} not found for '{}'",
                    self.project_number, self.owner
                ))
            })?;

        let field = project.field.ok_or_else(|| {
            EngineError::Config(format!(
                "project {} has no field named '{}'",
                self.project_number, self.status_field
            ))
        })?;
        let field_id = field.id.ok_or_else(|| {
            EngineError::Config(format!(
                "field '{}' is not a single-select field",
                self.status_field
            ))
        })?;

        Ok(BoardSchema {
            project_id: project.id,
            status_field_id: field_id,
            options: field
                .options
                .into_iter()
                .map(|option| StatusOption { id: option.id, name: option.name })
                .collect(),
        })
    }

    async fn existing_comments(&self, issue_id: &str) -> EngineResult<Vec<IssueComment>> {
        let mut comments = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let data: IssueCommentsData = self
                .client
                .post(
                    queries::ISSUE_COMMENTS,
                    serde_json::json!({ "issueId": issue_id, "cursor": cursor }),
                )
                .await?;

            let Some(with_comments) = data.node else { break };
            let connection = with_comments.comments;

            comments.extend(connection.nodes.into_iter().map(|node| IssueComment {
                body: node.body,
                created_at: node.created_at,
            }));

            if !connection.page_info.has_next_page {
                break;
            }
            cursor = connection.page_info.end_cursor;
        }

        Ok(comments)
    }

    async fn set_item_status(&self, target: &StatusTarget, item_id: &str) -> EngineResult<()> {
        let data: UpdateItemStatusData = self
            .client
            .post(
                queries::UPDATE_ITEM_STATUS,
                serde_json::json!({
                    "projectId": target.project_id,
                    "itemId": item_id,
                    "fieldId": target.field_id,
                    "optionId": target.option_id,
                }),
            )
            .await
            .map_err(|err| Self::mutation_error(item_id, err))?;

        if data.update.and_then(|update| update.project_v2_item).is_none() {
            return Err(EngineError::Mutation {
                item: item_id.to_string(),
                message: "status mutation returned no item".to_string(),
            });
        }
        Ok(())
    }

    async fn add_comment(&self, issue_id: &str, body: &str) -> EngineResult<()> {
        let data: AddCommentData = self
            .client
            .post(
                queries::ADD_COMMENT,
                serde_json::json!({ "subjectId": issue_id, "body": body }),
            )
            .await
            .map_err(|err| Self::mutation_error(issue_id, err))?;

        if data
            .add_comment
            .and_then(|added| added.comment_edge)
            .and_then(|edge| edge.node)
            .is_none()
        {
            return Err(EngineError::Mutation {
                item: issue_id.to_string(),
                message: "comment mutation returned no node".to_string(),
            });
        }
        Ok(())
    }
}
