use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::JiraClient;
use crate::consts::SPRINT_ISSUE_BATCH;
use crate::error::api_error;
use crate::models::{JiraIssue, JiraSprint, NewSprint, SprintIssuesRequest, SprintUpdate};

impl JiraClient {
  /// Sprints of a board, optionally filtered by state (`future`, `active`, `closed`)
  pub async fn list_sprints(&self, board_id: u64, state: Option<&str>) -> Result<Vec<JiraSprint>> {
    let query: Vec<(&str, String)> = state.map(|s| ("state", s.to_string())).into_iter().collect();

    self
      .agile_pages(
        &format!("/rest/agile/1.0/board/{board_id}/sprint"),
        &query,
        &format!("Sprints of board {board_id}"),
      )
      .await
  }

  /// Get a sprint by id
  pub async fn get_sprint(&self, sprint_id: u64) -> Result<JiraSprint> {
    let response = self
      .request(Method::GET, &format!("/rest/agile/1.0/sprint/{sprint_id}"))
      .send()
      .await
      .context("Failed to fetch Jira sprint")?;

    match response.status() {
      StatusCode::OK => Ok(response.json::<JiraSprint>().await.context("Failed to parse Jira sprint")?),
      _ => Err(api_error(response, &format!("Sprint {sprint_id}")).await),
    }
  }

  /// Create a sprint on a board
  pub async fn create_sprint(&self, sprint: &NewSprint) -> Result<JiraSprint> {
    let response = self
      .request(Method::POST, "/rest/agile/1.0/sprint")
      .json(sprint)
      .send()
      .await
      .context("Failed to create Jira sprint")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let created = response
          .json::<JiraSprint>()
          .await
          .context("Failed to parse created Jira sprint")?;
        info!("Created sprint {} ({})", created.name, created.id);
        Ok(created)
      }
      _ => Err(api_error(response, &format!("Board {}", sprint.origin_board_id)).await),
    }
  }

  /// Partially update a sprint; unset fields are left alone
  pub async fn update_sprint(&self, sprint_id: u64, update: &SprintUpdate) -> Result<JiraSprint> {
    if update.is_empty() {
      anyhow::bail!("No fields given to update on sprint {sprint_id}");
    }

    let response = self
      .request(Method::POST, &format!("/rest/agile/1.0/sprint/{sprint_id}"))
      .json(update)
      .send()
      .await
      .context("Failed to update Jira sprint")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<JiraSprint>()
          .await
          .context("Failed to parse updated Jira sprint")?,
      ),
      _ => Err(api_error(response, &format!("Sprint {sprint_id}")).await),
    }
  }

  /// Delete a sprint
  pub async fn delete_sprint(&self, sprint_id: u64) -> Result<()> {
    let response = self
      .request(Method::DELETE, &format!("/rest/agile/1.0/sprint/{sprint_id}"))
      .send()
      .await
      .context("Failed to delete Jira sprint")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => {
        info!("Deleted sprint {sprint_id}");
        Ok(())
      }
      _ => Err(api_error(response, &format!("Sprint {sprint_id}")).await),
    }
  }

  /// Move issues into a sprint, in batches the API accepts
  pub async fn add_issues_to_sprint(&self, sprint_id: u64, issue_keys: &[String]) -> Result<()> {
    if issue_keys.is_empty() {
      anyhow::bail!("No issues given to add to sprint {sprint_id}");
    }

    for batch in issue_keys.chunks(SPRINT_ISSUE_BATCH) {
      let response = self
        .request(Method::POST, &format!("/rest/agile/1.0/sprint/{sprint_id}/issue"))
        .json(&SprintIssuesRequest { issues: batch.to_vec() })
        .send()
        .await
        .context("Failed to add issues to Jira sprint")?;

      match response.status() {
        StatusCode::NO_CONTENT | StatusCode::OK => {
          info!("Moved {} issues into sprint {sprint_id}", batch.len());
        }
        _ => return Err(api_error(response, &format!("Sprint {sprint_id}")).await),
      }
    }

    Ok(())
  }

  /// Issues in a sprint, at most `limit`
  pub async fn get_sprint_issues(&self, sprint_id: u64, limit: u32) -> Result<Vec<JiraIssue>> {
    self
      .collect_issues(
        &format!("/rest/agile/1.0/sprint/{sprint_id}/issue"),
        None,
        &format!("Sprint {sprint_id}"),
        limit,
      )
      .await
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{body_json, method, path, query_param};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::test_client;
  use crate::models::{NewSprint, SprintUpdate};

  fn sprint_body(id: u64, name: &str, state: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "state": state,
        "originBoardId": 1,
        "startDate": "2024-05-01T00:00:00.000Z",
        "endDate": "2024-05-15T00:00:00.000Z"
    })
  }

  #[tokio::test]
  async fn test_list_sprints_by_state() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/agile/1.0/board/1/sprint"))
      .and(query_param("state", "active"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "isLast": true,
          "values": [sprint_body(5, "Sprint 5", "active")]
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let sprints = client.list_sprints(1, Some("active")).await?;
    assert_eq!(sprints.len(), 1);
    assert_eq!(sprints[0].state, "active");
    assert_eq!(sprints[0].origin_board_id, Some(1));

    Ok(())
  }

  #[tokio::test]
  async fn test_create_sprint() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/agile/1.0/sprint"))
      .and(body_json(serde_json::json!({
          "name": "Sprint 6",
          "originBoardId": 1,
          "startDate": "2024-05-15T00:00:00.000Z",
          "endDate": "2024-05-29T00:00:00.000Z"
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(sprint_body(6, "Sprint 6", "future")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let sprint = client
      .create_sprint(&NewSprint {
        name: "Sprint 6".into(),
        origin_board_id: 1,
        start_date: Some("2024-05-15T00:00:00.000Z".into()),
        end_date: Some("2024-05-29T00:00:00.000Z".into()),
        goal: None,
      })
      .await?;
    assert_eq!(sprint.id, 6);

    Ok(())
  }

  #[tokio::test]
  async fn test_update_sprint_posts_partial_body() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/agile/1.0/sprint/5"))
      .and(body_json(serde_json::json!({ "state": "closed" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(sprint_body(5, "Sprint 5", "closed")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let sprint = client
      .update_sprint(
        5,
        &SprintUpdate {
          state: Some("closed".into()),
          ..Default::default()
        },
      )
      .await?;
    assert_eq!(sprint.state, "closed");

    Ok(())
  }

  #[tokio::test]
  async fn test_add_issues_to_sprint_in_batches() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/agile/1.0/sprint/5/issue"))
      .respond_with(ResponseTemplate::new(204))
      .expect(3)
      .mount(&mock_server)
      .await;

    let keys: Vec<String> = (1..=120).map(|n| format!("PROJ-{n}")).collect();
    client.add_issues_to_sprint(5, &keys).await?;

    Ok(())
  }

  #[tokio::test]
  async fn test_delete_sprint_forbidden() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("DELETE"))
      .and(path("/rest/agile/1.0/sprint/5"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&mock_server)
      .await;

    let err = client.delete_sprint(5).await.unwrap_err();
    assert_eq!(err.to_string(), "Permission denied for Sprint 5");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_sprint_issues() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/agile/1.0/sprint/5/issue"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "startAt": 0, "maxResults": 50, "total": 2,
          "issues": [
              { "id": "1", "key": "PROJ-1", "fields": { "summary": "One" } },
              { "id": "2", "key": "PROJ-2", "fields": { "summary": "Two" } }
          ]
      })))
      .mount(&mock_server)
      .await;

    let issues = client.get_sprint_issues(5, 50).await?;
    assert_eq!(issues.len(), 2);

    Ok(())
  }
}
