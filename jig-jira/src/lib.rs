//! # Jira API Client
//!
//! Async client for the Jira REST v2 and agile 1.0 APIs: issues, transitions,
//! comments, users, projects, boards and sprints. Failed calls surface as
//! [`JiraApiError`] wrapped in `anyhow::Error`.

mod client;
pub mod consts;
mod endpoints;
pub mod error;
pub mod models;

// Re-export the client
pub use client::{JiraClient, create_jira_client};
pub use endpoints::boards::BoardFilter;
pub use endpoints::transitions::{StatusChange, select_transition};
pub use error::JiraApiError;
// Re-export models
pub use models::{
  CreatedIssue, IssueFields, JiraAuth, JiraBoard, JiraComment, JiraIssue, JiraIssueFields, JiraIssueStatus,
  JiraProject, JiraSprint, JiraTransition, JiraUser, KeyRef, NewIssue, NewProject, NewSprint, ProjectUpdate,
  SprintUpdate,
};
