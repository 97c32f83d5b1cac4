//! GitHub GraphQL response models.
//!
//! These structs map to the `data` payloads of the documents in
//! [`super::queries`]. They are internal to the adapter; the domain layer
//! never sees them.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::models::{IssueState, MergeState};

/// Relay-style pagination cursor info.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub end_cursor: Option<String>,
    pub has_next_page: bool,
}

// ── merged pull requests ────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MergedPullRequestsData {
    pub repository: Option<RepositoryPullRequests>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPullRequests {
    pub pull_requests: PullRequestConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestConnection {
    pub nodes: Vec<PullRequestNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestNode {
    pub id: String,
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body_text: Option<String>,
    pub base_ref_name: String,
    pub state: MergeState,
    pub merged_at: Option<DateTime<Utc>>,
    pub url: String,
}

// ── issue resolution ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IssueByNumberData {
    pub repository: Option<RepositoryIssue>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryIssue {
    pub issue: Option<IssueNode>,
}

#[derive(Debug, Deserialize)]
pub struct IssueNode {
    pub id: String,
    pub number: u64,
    pub state: IssueState,
    pub url: String,
}

// ── project schema ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ProjectSchemaData {
    pub owner: Option<ProjectOwnerNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOwnerNode {
    pub project_v2: Option<ProjectNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectNode {
    pub id: String,
    pub field: Option<FieldNode>,
}

/// The status field. The inline fragment only populates these for
/// single-select fields; a field of any other type deserializes with
/// both unset.
#[derive(Debug, Default, Deserialize)]
pub struct FieldNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub options: Vec<FieldOptionNode>,
}

#[derive(Debug, Deserialize)]
pub struct FieldOptionNode {
    pub id: String,
    pub name: String,
}

// ── issue project items ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IssueProjectItemsData {
    pub node: Option<IssueWithItems>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueWithItems {
    pub project_items: ProjectItemConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItemConnection {
    pub nodes: Vec<ProjectItemNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectItemNode {
    pub id: String,
    pub project: ProjectRefNode,
    #[serde(default)]
    pub field_value_by_name: Option<FieldValueNode>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectRefNode {
    pub number: u64,
}

/// Current status value. Only single-select values carry a name.
#[derive(Debug, Default, Deserialize)]
pub struct FieldValueNode {
    #[serde(default)]
    pub name: Option<String>,
}

// ── issue comments ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct IssueCommentsData {
    pub node: Option<IssueWithComments>,
}

#[derive(Debug, Deserialize)]
pub struct IssueWithComments {
    pub comments: CommentConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentConnection {
    pub nodes: Vec<CommentNode>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentNode {
    pub body: String,
    pub created_at: DateTime<Utc>,
}

// ── mutations ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UpdateItemStatusData {
    #[serde(rename = "updateProjectV2ItemFieldValue")]
    pub update: Option<MutatedProjectItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutatedProjectItem {
    pub project_v2_item: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
pub struct AddCommentData {
    #[serde(rename = "addComment")]
    pub add_comment: Option<AddedComment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedComment {
    pub comment_edge: Option<CommentEdge>,
}

#[derive(Debug, Deserialize)]
pub struct CommentEdge {
    pub node: Option<NodeRef>,
}

#[derive(Debug, Deserialize)]
pub struct NodeRef {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_page_deserialization() {
        let json = r#"{
            "repository": {
                "pullRequests": {
                    "nodes": [{
                        "id": "PR_kwDO1",
                        "number": 123,
                        "title": "Add retry budget",
                        "bodyText": "Fixes #42",
                        "baseRefName": "dev",
                        "state": "MERGED",
                        "mergedAt": "2024-03-01T12:00:00Z",
                        "url": "https://github.com/org/repo/pull/123"
                    }],
                    "pageInfo": { "endCursor": "abc", "hasNextPage": true }
                }
            }
        }"#;
        let data: MergedPullRequestsData = serde_json::from_str(json).unwrap();
        let connection = data.repository.unwrap().pull_requests;
        assert_eq!(connection.nodes.len(), 1);
        assert_eq!(connection.nodes[0].number, 123);
        assert_eq!(connection.nodes[0].state, MergeState::Merged);
        assert!(connection.page_info.has_next_page);
    }

    #[test]
    fn test_pull_request_null_body_and_merged_at() {
        let json = r#"{
            "id": "PR_1",
            "number": 1,
            "title": "t",
            "bodyText": null,
            "baseRefName": "dev",
            "state": "OPEN",
            "mergedAt": null,
            "url": "https://github.com/org/repo/pull/1"
        }"#;
        let node: PullRequestNode = serde_json::from_str(json).unwrap();
        assert!(node.body_text.is_none());
        assert!(node.merged_at.is_none());
    }

    #[test]
    fn test_schema_deserialization() {
        let json = r#"{
            "owner": {
                "projectV2": {
                    "id": "PVT_1",
                    "field": {
                        "id": "PVTSSF_1",
                        "options": [
                            { "id": "a1", "name": "Backlog" },
                            { "id": "b2", "name": "QA Testing" }
                        ]
                    }
                }
            }
        }"#;
        let data: ProjectSchemaData = serde_json::from_str(json).unwrap();
        let field = data.owner.unwrap().project_v2.unwrap().field.unwrap();
        assert_eq!(field.id.as_deref(), Some("PVTSSF_1"));
        assert_eq!(field.options.len(), 2);
    }

    #[test]
    fn test_non_single_select_field_deserializes_empty() {
        // The inline fragment contributes nothing for other field types.
        let data: ProjectSchemaData = serde_json::from_str(
            r#"{"owner": {"projectV2": {"id": "PVT_1", "field": {}}}}"#,
        )
        .unwrap();
        let field = data.owner.unwrap().project_v2.unwrap().field.unwrap();
        assert!(field.id.is_none());
        assert!(field.options.is_empty());
    }

    #[test]
    fn test_project_item_with_unset_status() {
        let json = r#"{
            "id": "PVTI_1",
            "project": { "number": 3 },
            "fieldValueByName": null
        }"#;
        let node: ProjectItemNode = serde_json::from_str(json).unwrap();
        assert!(node.field_value_by_name.is_none());
    }

    #[test]
    fn test_comment_page_deserialization() {
        let json = r#"{
            "node": {
                "comments": {
                    "nodes": [
                        { "body": "first", "createdAt": "2024-01-01T00:00:00Z" }
                    ],
                    "pageInfo": { "endCursor": null, "hasNextPage": false }
                }
            }
        }"#;
        let data: IssueCommentsData = serde_json::from_str(json).unwrap();
        let comments = data.node.unwrap().comments;
        assert_eq!(comments.nodes[0].body, "first");
        assert!(!comments.page_info.has_next_page);
    }
}
