//! # Jira Issue Endpoints
//!
//! Jira API endpoint implementations for issue operations,
//! including fetching, creating, editing, deleting and assigning issues.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use crate::client::JiraClient;
use crate::error::api_error;
use crate::models::{AssigneeRequest, CreatedIssue, IssueFields, IssueRequest, JiraIssue, NewIssue};

impl JiraClient {
  /// Get a Jira issue by key
  pub async fn get_issue(&self, issue_key: &str) -> Result<JiraIssue> {
    let response = self
      .request(Method::GET, &format!("/rest/api/2/issue/{issue_key}"))
      .send()
      .await
      .context("Failed to fetch Jira issue")?;

    match response.status() {
      StatusCode::OK => {
        let issue = response
          .json::<JiraIssue>()
          .await
          .context("Failed to parse Jira issue")?;
        Ok(issue)
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Create an issue, returning its key
  pub async fn create_issue(&self, issue: &NewIssue) -> Result<CreatedIssue> {
    debug!("Creating {} in {}: {}", issue.issue_type, issue.project_key, issue.summary);

    let payload = IssueRequest {
      fields: IssueFields::from(issue),
    };

    let response = self
      .request(Method::POST, "/rest/api/2/issue")
      .json(&payload)
      .send()
      .await
      .context("Failed to create Jira issue")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let created = response
          .json::<CreatedIssue>()
          .await
          .context("Failed to parse created Jira issue")?;
        info!("Created issue {}", created.key);
        Ok(created)
      }
      _ => Err(api_error(response, &format!("Project {}", issue.project_key)).await),
    }
  }

  /// Edit the given fields of an issue
  pub async fn update_issue(&self, issue_key: &str, fields: IssueFields) -> Result<()> {
    if fields.is_empty() {
      anyhow::bail!("No fields given to update on {issue_key}");
    }

    let response = self
      .request(Method::PUT, &format!("/rest/api/2/issue/{issue_key}"))
      .json(&IssueRequest { fields })
      .send()
      .await
      .context("Failed to update Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Updated issue {issue_key}");
        Ok(())
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Delete an issue together with its subtasks
  pub async fn delete_issue(&self, issue_key: &str) -> Result<()> {
    let response = self
      .request(Method::DELETE, &format!("/rest/api/2/issue/{issue_key}"))
      .query(&[("deleteSubtasks", "true")])
      .send()
      .await
      .context("Failed to delete Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Deleted issue {issue_key}");
        Ok(())
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Assign an issue to an account, or unassign it with `None`
  pub async fn assign_issue(&self, issue_key: &str, account_id: Option<&str>) -> Result<()> {
    let payload = AssigneeRequest {
      account_id: account_id.map(str::to_string),
    };

    let response = self
      .request(Method::PUT, &format!("/rest/api/2/issue/{issue_key}/assignee"))
      .json(&payload)
      .send()
      .await
      .context("Failed to assign Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Assigned issue {issue_key} to {}", account_id.unwrap_or("nobody"));
        Ok(())
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }
}
