//! # Listing Rows
//!
//! `tabled` row types for every listing command. Each cell is fitted to its
//! column width on construction so tables keep a fixed shape.

use jig_core::dates::display_date;
use jig_core::table::fit;
use jig_jira::{JiraBoard, JiraComment, JiraIssue, JiraProject, JiraSprint};
use tabled::Tabled;

use crate::consts::{COMMENT_WIDTH, DATE_WIDTH, KEY_WIDTH, NAME_WIDTH, STATUS_WIDTH, SUMMARY_WIDTH, TYPE_WIDTH};

/// Shown in place of an empty user or date
const NONE: &str = "-";

#[derive(Tabled)]
pub struct IssueRow {
  #[tabled(rename = "Key")]
  pub key: String,
  #[tabled(rename = "Summary")]
  pub summary: String,
  #[tabled(rename = "Status")]
  pub status: String,
  #[tabled(rename = "Assignee")]
  pub assignee: String,
}

impl From<&JiraIssue> for IssueRow {
  fn from(issue: &JiraIssue) -> Self {
    let assignee = issue.fields.assignee.as_ref().map_or(NONE, |u| u.display_name.as_str());
    Self {
      key: fit(&issue.key, KEY_WIDTH),
      summary: fit(&issue.fields.summary, SUMMARY_WIDTH),
      status: fit(&issue.fields.status.name, STATUS_WIDTH),
      assignee: fit(assignee, NAME_WIDTH),
    }
  }
}

#[derive(Tabled)]
pub struct ProjectRow {
  #[tabled(rename = "Key")]
  pub key: String,
  #[tabled(rename = "Name")]
  pub name: String,
  #[tabled(rename = "Type")]
  pub project_type: String,
  #[tabled(rename = "Lead")]
  pub lead: String,
}

impl From<&JiraProject> for ProjectRow {
  fn from(project: &JiraProject) -> Self {
    Self {
      key: fit(&project.key, KEY_WIDTH),
      name: fit(&project.name, SUMMARY_WIDTH),
      project_type: fit(project.project_type_key.as_deref().unwrap_or(NONE), TYPE_WIDTH),
      lead: fit(
        project.lead.as_ref().map_or(NONE, |u| u.display_name.as_str()),
        NAME_WIDTH,
      ),
    }
  }
}

#[derive(Tabled)]
pub struct BoardRow {
  #[tabled(rename = "ID")]
  pub id: String,
  #[tabled(rename = "Name")]
  pub name: String,
  #[tabled(rename = "Type")]
  pub board_type: String,
  #[tabled(rename = "Project")]
  pub project: String,
}

impl From<&JiraBoard> for BoardRow {
  fn from(board: &JiraBoard) -> Self {
    let project = board
      .location
      .as_ref()
      .and_then(|l| l.project_key.as_deref())
      .unwrap_or(NONE);
    Self {
      id: fit(&board.id.to_string(), 8),
      name: fit(&board.name, SUMMARY_WIDTH),
      board_type: fit(&board.board_type, TYPE_WIDTH),
      project: fit(project, KEY_WIDTH),
    }
  }
}

#[derive(Tabled)]
pub struct SprintRow {
  #[tabled(rename = "ID")]
  pub id: String,
  #[tabled(rename = "Name")]
  pub name: String,
  #[tabled(rename = "State")]
  pub state: String,
  #[tabled(rename = "Start")]
  pub start: String,
  #[tabled(rename = "End")]
  pub end: String,
}

impl From<&JiraSprint> for SprintRow {
  fn from(sprint: &JiraSprint) -> Self {
    let date = |value: &Option<String>| {
      let shown = value.as_deref().map_or_else(|| NONE.to_string(), display_date);
      fit(&shown, DATE_WIDTH)
    };
    Self {
      id: fit(&sprint.id.to_string(), 8),
      name: fit(&sprint.name, NAME_WIDTH),
      state: fit(&sprint.state, TYPE_WIDTH),
      start: date(&sprint.start_date),
      end: date(&sprint.end_date),
    }
  }
}

#[derive(Tabled)]
pub struct CommentRow {
  #[tabled(rename = "Author")]
  pub author: String,
  #[tabled(rename = "Created")]
  pub created: String,
  #[tabled(rename = "Comment")]
  pub body: String,
}

impl From<&JiraComment> for CommentRow {
  fn from(comment: &JiraComment) -> Self {
    Self {
      author: fit(
        comment.author.as_ref().map_or(NONE, |u| u.display_name.as_str()),
        NAME_WIDTH,
      ),
      created: fit(
        &comment.created.as_deref().map_or_else(|| NONE.to_string(), display_date),
        DATE_WIDTH,
      ),
      body: fit(&comment.body, COMMENT_WIDTH),
    }
  }
}

/// Row for `story import --dry-run`
#[derive(Tabled)]
pub struct ImportPreviewRow {
  #[tabled(rename = "Row")]
  pub row: String,
  #[tabled(rename = "Type")]
  pub issue_type: String,
  #[tabled(rename = "Summary")]
  pub summary: String,
  #[tabled(rename = "Assignee")]
  pub assignee: String,
}

impl From<&jig_core::import::ImportRow> for ImportPreviewRow {
  fn from(row: &jig_core::import::ImportRow) -> Self {
    Self {
      row: fit(&row.row.to_string(), 5),
      issue_type: fit(&row.issue_type, TYPE_WIDTH),
      summary: fit(&row.summary, SUMMARY_WIDTH),
      assignee: fit(row.assignee.as_deref().unwrap_or(NONE), NAME_WIDTH),
    }
  }
}

/// Rows for a list of issues
pub fn issue_rows(issues: &[JiraIssue]) -> Vec<IssueRow> {
  issues.iter().map(IssueRow::from).collect()
}
