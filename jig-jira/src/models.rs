use serde::{Deserialize, Serialize};

/// Represents Jira authentication credentials
#[derive(Clone)]
pub struct JiraAuth {
  pub username: String,
  pub api_token: String,
}

/// Represents a Jira user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JiraUser {
  pub account_id: Option<String>,
  pub display_name: String,
  pub email_address: Option<String>,
  #[serde(default = "default_true")]
  pub active: bool,
}

const fn default_true() -> bool {
  true
}

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  pub id: String,
  pub key: String,
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JiraIssueFields {
  pub summary: String,
  pub description: Option<String>,
  pub status: JiraIssueStatus,
  #[serde(rename = "issuetype")]
  pub issue_type: Option<JiraIssueType>,
  pub assignee: Option<JiraUser>,
  pub parent: Option<JiraIssueRef>,
  pub labels: Vec<String>,
  pub created: Option<String>,
  pub updated: Option<String>,
}

/// Represents a Jira issue status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JiraIssueStatus {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Represents a Jira issue type
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueType {
  #[serde(default)]
  pub id: Option<String>,
  pub name: String,
}

/// Reference to another issue, e.g. a story's parent epic
#[derive(Debug, Clone, Deserialize)]
pub struct JiraIssueRef {
  #[serde(default)]
  pub id: Option<String>,
  pub key: String,
}

/// Response body of a JQL search
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchResults {
  pub start_at: u32,
  pub max_results: u32,
  pub total: u32,
  pub issues: Vec<JiraIssue>,
}

/// Response body after creating an issue
#[derive(Debug, Deserialize)]
pub struct CreatedIssue {
  pub id: String,
  pub key: String,
}

/// Fields sent when creating or editing an issue. Unset fields are left out
/// of the payload so an edit never clears them.
#[derive(Debug, Default, Serialize)]
pub struct IssueFields {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub project: Option<KeyRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub summary: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(rename = "issuetype", skip_serializing_if = "Option::is_none")]
  pub issue_type: Option<NameRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub parent: Option<KeyRef>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub labels: Option<Vec<String>>,
}

impl IssueFields {
  /// True when nothing would be sent
  pub const fn is_empty(&self) -> bool {
    self.project.is_none()
      && self.summary.is_none()
      && self.description.is_none()
      && self.issue_type.is_none()
      && self.parent.is_none()
      && self.labels.is_none()
  }
}

/// `{"key": ...}` reference used for projects and parents
#[derive(Debug, Clone, Serialize)]
pub struct KeyRef {
  pub key: String,
}

/// `{"name": ...}` reference used for issue types
#[derive(Debug, Clone, Serialize)]
pub struct NameRef {
  pub name: String,
}

/// An issue to create
#[derive(Debug, Clone)]
pub struct NewIssue {
  pub project_key: String,
  pub summary: String,
  pub description: Option<String>,
  pub issue_type: String,
  pub parent_key: Option<String>,
  pub labels: Vec<String>,
}

impl From<&NewIssue> for IssueFields {
  fn from(issue: &NewIssue) -> Self {
    Self {
      project: Some(KeyRef {
        key: issue.project_key.clone(),
      }),
      summary: Some(issue.summary.clone()),
      description: issue.description.clone(),
      issue_type: Some(NameRef {
        name: issue.issue_type.clone(),
      }),
      parent: issue.parent_key.clone().map(|key| KeyRef { key }),
      labels: (!issue.labels.is_empty()).then(|| issue.labels.clone()),
    }
  }
}

/// Wrapper for create and edit payloads
#[derive(Debug, Serialize)]
pub struct IssueRequest {
  pub fields: IssueFields,
}

/// Assignee change; `None` unassigns the issue
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssigneeRequest {
  pub account_id: Option<String>,
}

/// Represents a Jira transition
#[derive(Debug, Clone, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
  /// The status the issue lands in after the transition
  #[serde(default)]
  pub to: Option<JiraIssueStatus>,
}

impl JiraTransition {
  /// Name of the status this transition leads to
  pub fn target_name(&self) -> &str {
    self.to.as_ref().map_or(self.name.as_str(), |status| status.name.as_str())
  }
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<JiraTransition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Represents an issue comment
#[derive(Debug, Deserialize)]
pub struct JiraComment {
  pub id: String,
  #[serde(default)]
  pub author: Option<JiraUser>,
  #[serde(default)]
  pub body: String,
  #[serde(default)]
  pub created: Option<String>,
}

/// Comment page returned for an issue
#[derive(Debug, Deserialize)]
pub struct JiraComments {
  pub comments: Vec<JiraComment>,
}

/// New comment payload
#[derive(Debug, Serialize)]
pub struct CommentRequest {
  pub body: String,
}

/// Represents a Jira project
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraProject {
  pub id: String,
  pub key: String,
  pub name: String,
  #[serde(default)]
  pub project_type_key: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub lead: Option<JiraUser>,
}

/// Response body after creating a project
#[derive(Debug, Deserialize)]
pub struct CreatedProject {
  pub id: u64,
  pub key: String,
}

/// A project to create
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
  pub key: String,
  pub name: String,
  pub project_type_key: String,
  pub lead_account_id: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// Project edit payload
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lead_account_id: Option<String>,
}

impl ProjectUpdate {
  /// True when nothing would be sent
  pub const fn is_empty(&self) -> bool {
    self.name.is_none() && self.description.is_none() && self.lead_account_id.is_none()
  }
}

/// One page from an agile API listing
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgilePage<T> {
  #[serde(default)]
  pub start_at: u32,
  #[serde(default)]
  pub max_results: u32,
  #[serde(default = "default_true")]
  pub is_last: bool,
  pub values: Vec<T>,
}

/// Represents an agile board
#[derive(Debug, Clone, Deserialize)]
pub struct JiraBoard {
  pub id: u64,
  pub name: String,
  #[serde(rename = "type")]
  pub board_type: String,
  #[serde(default)]
  pub location: Option<BoardLocation>,
}

/// The project a board belongs to
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardLocation {
  pub project_key: Option<String>,
  pub display_name: Option<String>,
}

/// Represents a sprint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraSprint {
  pub id: u64,
  pub name: String,
  pub state: String,
  #[serde(default)]
  pub start_date: Option<String>,
  #[serde(default)]
  pub end_date: Option<String>,
  #[serde(default)]
  pub complete_date: Option<String>,
  #[serde(default)]
  pub goal: Option<String>,
  #[serde(default)]
  pub origin_board_id: Option<u64>,
}

/// A sprint to create
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSprint {
  pub name: String,
  pub origin_board_id: u64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal: Option<String>,
}

/// Partial sprint update
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SprintUpdate {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub goal: Option<String>,
}

impl SprintUpdate {
  /// True when nothing would be sent
  pub const fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.state.is_none()
      && self.start_date.is_none()
      && self.end_date.is_none()
      && self.goal.is_none()
  }
}

/// Issues to move into a sprint
#[derive(Debug, Serialize)]
pub struct SprintIssuesRequest {
  pub issues: Vec<String>,
}
