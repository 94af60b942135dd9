use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};

use crate::client::JiraClient;
use crate::error::api_error;
use crate::models::{CommentRequest, JiraComment, JiraComments};

impl JiraClient {
  /// List the comments on an issue, oldest first
  pub async fn get_comments(&self, issue_key: &str) -> Result<Vec<JiraComment>> {
    let response = self
      .request(Method::GET, &format!("/rest/api/2/issue/{issue_key}/comment"))
      .query(&[("orderBy", "created")])
      .send()
      .await
      .context("Failed to fetch Jira comments")?;

    match response.status() {
      StatusCode::OK => {
        let page = response
          .json::<JiraComments>()
          .await
          .context("Failed to parse Jira comments")?;
        Ok(page.comments)
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Add a plain-text comment to an issue
  pub async fn add_comment(&self, issue_key: &str, body: &str) -> Result<JiraComment> {
    if body.trim().is_empty() {
      anyhow::bail!("Comment body must not be empty");
    }

    let response = self
      .request(Method::POST, &format!("/rest/api/2/issue/{issue_key}/comment"))
      .json(&CommentRequest { body: body.to_string() })
      .send()
      .await
      .context("Failed to add Jira comment")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => Ok(
        response
          .json::<JiraComment>()
          .await
          .context("Failed to parse created Jira comment")?,
      ),
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }
}
