//! Project board item and schema models.

use serde::{Deserialize, Serialize};

use super::pull_request::IssueState;

/// A project board entry for an issue, with its current status value.
///
/// Fetched fresh each run; never cached across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectItem {
    /// GraphQL node id of the project item.
    pub item_id: String,
    /// Number of the project this item belongs to.
    pub project_number: u64,
    /// GraphQL node id of the underlying issue.
    pub issue_id: String,
    /// Number of the underlying issue.
    pub issue_number: u64,
    /// Open/closed state of the underlying issue.
    pub issue_state: IssueState,
    /// Current value of the configured status field, if set.
    pub status: Option<String>,
}

impl ProjectItem {
    /// Whether the item's status field already equals `target`.
    pub fn has_status(&self, target: &str) -> bool {
        self.status.as_deref() == Some(target)
    }
}

/// A single-select option on the board's status field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusOption {
    pub id: String,
    pub name: String,
}

/// Board schema for the configured project: the status field and its options.
///
/// Fetched once per run and used to translate the target status name into
/// the option id the mutation API requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSchema {
    /// GraphQL node id of the project.
    pub project_id: String,
    /// GraphQL node id of the status field.
    pub status_field_id: String,
    /// All options declared on the status field.
    pub options: Vec<StatusOption>,
}

impl BoardSchema {
    /// Look up the option id for a status name (exact match).
    pub fn option_id(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.id.as_str())
    }

    /// Resolve the mutation target for a status name.
    pub fn target(&self, name: &str) -> Option<StatusTarget> {
        self.option_id(name).map(|option_id| StatusTarget {
            project_id: self.project_id.clone(),
            field_id: self.status_field_id.clone(),
            option_id: option_id.to_string(),
        })
    }
}

/// Everything a status mutation needs: project, field, and option ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusTarget {
    pub project_id: String,
    pub field_id: String,
    pub option_id: String,
}
