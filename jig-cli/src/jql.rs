//! JQL query building for the listing commands.

/// Quote a value for use in JQL
pub fn quote(value: &str) -> String {
  format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Assignee filter for issue listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeFilter {
  CurrentUser,
  Unassigned,
  Account(String),
}

/// Filters for `story list`
#[derive(Debug, Default, Clone)]
pub struct IssueQuery {
  pub project: Option<String>,
  pub issue_type: Option<String>,
  pub status: Option<String>,
  pub assignee: Option<AssigneeFilter>,
  pub parent: Option<String>,
}

impl IssueQuery {
  /// Render as JQL, newest issues first
  pub fn to_jql(&self) -> String {
    let mut clauses = Vec::new();

    if let Some(project) = &self.project {
      clauses.push(format!("project = {}", quote(project)));
    }
    if let Some(parent) = &self.parent {
      clauses.push(format!("parent = {}", quote(parent)));
    }
    if let Some(issue_type) = &self.issue_type {
      clauses.push(format!("issuetype = {}", quote(issue_type)));
    }
    if let Some(status) = &self.status {
      clauses.push(format!("status = {}", quote(status)));
    }
    match &self.assignee {
      Some(AssigneeFilter::CurrentUser) => clauses.push("assignee = currentUser()".to_string()),
      Some(AssigneeFilter::Unassigned) => clauses.push("assignee is EMPTY".to_string()),
      Some(AssigneeFilter::Account(id)) => clauses.push(format!("assignee = {}", quote(id))),
      None => {}
    }

    format!("{} ORDER BY created DESC", clauses.join(" AND "))
  }
}
