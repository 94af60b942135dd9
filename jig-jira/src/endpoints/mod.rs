//! # Jira API Endpoints
//!
//! One module per Jira resource. Each adds methods to
//! [`JiraClient`](crate::JiraClient).

pub mod boards;
pub mod comments;
pub mod issues;
pub mod projects;
pub mod search;
pub mod sprints;
pub mod transitions;
pub mod users;
