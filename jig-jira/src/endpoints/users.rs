//! # Jira User Endpoints
//!
//! Looks up the authenticated user and resolves free-text user queries
//! (email address or display name) to a single account.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::JiraClient;
use crate::error::api_error;
use crate::models::JiraUser;

impl JiraClient {
  /// The user the API token belongs to
  pub async fn get_myself(&self) -> Result<JiraUser> {
    let response = self
      .request(Method::GET, "/rest/api/2/myself")
      .send()
      .await
      .context("Failed to fetch current Jira user")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<JiraUser>()
          .await
          .context("Failed to parse current Jira user")?,
      ),
      _ => Err(api_error(response, "Current user").await),
    }
  }

  /// Search users by email address or name
  pub async fn search_users(&self, query: &str) -> Result<Vec<JiraUser>> {
    let response = self
      .request(Method::GET, "/rest/api/2/user/search")
      .query(&[("query", query)])
      .send()
      .await
      .context("Failed to search Jira users")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<Vec<JiraUser>>()
          .await
          .context("Failed to parse Jira users")?,
      ),
      _ => Err(api_error(response, &format!("User '{query}'")).await),
    }
  }

  /// Resolve a query to exactly one active user with an account id
  pub async fn find_user(&self, query: &str) -> Result<JiraUser> {
    let query = query.trim();
    if query.is_empty() {
      anyhow::bail!("User query must not be empty");
    }

    let mut matches: Vec<JiraUser> = self
      .search_users(query)
      .await?
      .into_iter()
      .filter(|user| user.active && user.account_id.is_some())
      .collect();
    debug!("User query '{query}' matched {} active users", matches.len());

    match matches.len() {
      0 => anyhow::bail!("No active Jira user matches '{query}'"),
      1 => Ok(matches.remove(0)),
      n => {
        let names: Vec<&str> = matches.iter().map(|u| u.display_name.as_str()).collect();
        anyhow::bail!("'{query}' matches {n} users ({}); be more specific", names.join(", "))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::test_client;
  use crate::error::JiraApiError;

  #[tokio::test]
  async fn test_get_myself() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "accountId": "me-123",
          "displayName": "Test User",
          "emailAddress": "test@example.com",
          "active": true
      })))
      .mount(&mock_server)
      .await;

    let me = client.get_myself().await?;
    assert_eq!(me.account_id.as_deref(), Some("me-123"));
    assert_eq!(me.display_name, "Test User");

    Ok(())
  }

  #[tokio::test]
  async fn test_find_user_single_active_match() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .and(query_param("query", "alice"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          { "accountId": "a-1", "displayName": "Alice", "active": true },
          { "accountId": "a-2", "displayName": "Alice (old)", "active": false }
      ])))
      .mount(&mock_server)
      .await;

    let user = client.find_user("alice").await?;
    assert_eq!(user.account_id.as_deref(), Some("a-1"));

    Ok(())
  }

  #[tokio::test]
  async fn test_find_user_ambiguous() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          { "accountId": "a-1", "displayName": "Sam One" },
          { "accountId": "a-2", "displayName": "Sam Two" }
      ])))
      .mount(&mock_server)
      .await;

    let err = client.find_user("sam").await.unwrap_err();
    assert!(err.to_string().contains("matches 2 users"));

    Ok(())
  }

  #[tokio::test]
  async fn test_find_user_no_match() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
      .mount(&mock_server)
      .await;

    let err = client.find_user("nobody@example.com").await.unwrap_err();
    assert!(err.to_string().contains("No active Jira user"));

    Ok(())
  }

  #[tokio::test]
  async fn test_search_users_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/user/search"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    let err = client.search_users("alice").await.unwrap_err();
    assert_eq!(err.downcast_ref::<JiraApiError>(), Some(&JiraApiError::Unauthorized));

    Ok(())
  }
}
