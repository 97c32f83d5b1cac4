//! GraphQL documents used by the GitHub adapter.
//!
//! The schema queries alias `organization`/`user` to `owner` so both
//! ownership paths deserialize into the same response shape.

/// Pull requests merged into a branch, newest update first, paginated.
pub const MERGED_PULL_REQUESTS: &str = r"
query MergedPullRequests($owner: String!, $repo: String!, $branch: String!, $cursor: String) {
  repository(owner: $owner, name: $repo) {
    pullRequests(
      first: 50
      after: $cursor
      baseRefName: $branch
      states: MERGED
      orderBy: {field: UPDATED_AT, direction: DESC}
    ) {
      nodes {
        id
        number
        title
        bodyText
        baseRefName
        state
        mergedAt
        url
      }
      pageInfo {
        endCursor
        hasNextPage
      }
    }
  }
}
";

/// Resolve an issue by repository and number.
pub const ISSUE_BY_NUMBER: &str = r"
query IssueByNumber($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    issue(number: $number) {
      id
      number
      state
      url
    }
  }
}
";

/// Status field schema of an organization-owned project.
pub const ORGANIZATION_PROJECT_SCHEMA: &str = r"
query OrganizationProjectSchema($login: String!, $number: Int!, $field: String!) {
  owner: organization(login: $login) {
    projectV2(number: $number) {
      id
      field(name: $field) {
        ... on ProjectV2SingleSelectField {
          id
          options {
            id
            name
          }
        }
      }
    }
  }
}
";

/// Status field schema of a user-owned project.
pub const USER_PROJECT_SCHEMA: &str = r"
query UserProjectSchema($login: String!, $number: Int!, $field: String!) {
  owner: user(login: $login) {
    projectV2(number: $number) {
      id
      field(name: $field) {
        ... on ProjectV2SingleSelectField {
          id
          options {
            id
            name
          }
        }
      }
    }
  }
}
";

/// Project items of an issue with the current status field value, paginated.
pub const ISSUE_PROJECT_ITEMS: &str = r"
query IssueProjectItems($issueId: ID!, $field: String!, $cursor: String) {
  node(id: $issueId) {
    ... on Issue {
      projectItems(first: 50, after: $cursor) {
        nodes {
          id
          project {
            number
          }
          fieldValueByName(name: $field) {
            ... on ProjectV2ItemFieldSingleSelectValue {
              name
            }
          }
        }
        pageInfo {
          endCursor
          hasNextPage
        }
      }
    }
  }
}
";

/// All comments on an issue thread, paginated.
pub const ISSUE_COMMENTS: &str = r"
query IssueComments($issueId: ID!, $cursor: String) {
  node(id: $issueId) {
    ... on Issue {
      comments(first: 100, after: $cursor) {
        nodes {
          body
          createdAt
        }
        pageInfo {
          endCursor
          hasNextPage
        }
      }
    }
  }
}
";

/// Set a single-select field on a project item.
pub const UPDATE_ITEM_STATUS: &str = r"
mutation UpdateItemStatus($projectId: ID!, $itemId: ID!, $fieldId: ID!, $optionId: String!) {
  updateProjectV2ItemFieldValue(
    input: {
      projectId: $projectId
      itemId: $itemId
      fieldId: $fieldId
      value: {singleSelectOptionId: $optionId}
    }
  ) {
    projectV2Item {
      id
    }
  }
}
";

/// Add a comment to an issue thread.
pub const ADD_COMMENT: &str = r"
mutation AddComment($subjectId: ID!, $body: String!) {
  addComment(input: {subjectId: $subjectId, body: $body}) {
    commentEdge {
      node {
        id
      }
    }
  }
}
";
