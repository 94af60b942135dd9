use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

use crate::client::JiraClient;
use crate::error::api_error;
use crate::models::{JiraTransition, JiraTransitions, TransitionId, TransitionRequest};

/// Outcome of asking an issue to move to a named status
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
  /// The matching transition was posted
  Applied { transition_id: String, status: String },
  /// No available transition leads to the requested status
  Unavailable { available: Vec<String> },
}

/// Find the transition whose target status is exactly `status`
pub fn select_transition<'a>(transitions: &'a [JiraTransition], status: &str) -> Option<&'a JiraTransition> {
  transitions.iter().find(|t| t.target_name() == status)
}

impl JiraClient {
  /// Get available transitions for an issue
  pub async fn get_transitions(&self, issue_key: &str) -> Result<Vec<JiraTransition>> {
    let response = self
      .request(Method::GET, &format!("/rest/api/2/issue/{issue_key}/transitions"))
      .send()
      .await
      .context("Failed to fetch Jira transitions")?;

    match response.status() {
      StatusCode::OK => {
        let transitions = response
          .json::<JiraTransitions>()
          .await
          .context("Failed to parse Jira transitions")?;
        Ok(transitions.transitions)
      }
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Transition an issue to a new status
  pub async fn transition_issue(&self, issue_key: &str, transition_id: &str) -> Result<()> {
    let payload = TransitionRequest {
      transition: TransitionId {
        id: transition_id.to_string(),
      },
    };

    let response = self
      .request(Method::POST, &format!("/rest/api/2/issue/{issue_key}/transitions"))
      .json(&payload)
      .send()
      .await
      .context("Failed to transition Jira issue")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      _ => Err(api_error(response, &format!("Issue {issue_key}")).await),
    }
  }

  /// Move an issue to `status` if one of its transitions leads there.
  ///
  /// Nothing is posted when no transition matches.
  pub async fn transition_to_status(&self, issue_key: &str, status: &str) -> Result<StatusChange> {
    let transitions = self.get_transitions(issue_key).await?;
    debug!("{issue_key} has {} transitions available", transitions.len());

    let Some(transition) = select_transition(&transitions, status) else {
      return Ok(StatusChange::Unavailable {
        available: transitions.iter().map(|t| t.target_name().to_string()).collect(),
      });
    };

    self.transition_issue(issue_key, &transition.id).await?;
    info!("Moved {issue_key} to {status} via transition {}", transition.id);

    Ok(StatusChange::Applied {
      transition_id: transition.id.clone(),
      status: transition.target_name().to_string(),
    })
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{basic_auth, body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::client::test_client;
  use crate::models::JiraIssueStatus;

  fn transition(id: &str, name: &str, to: Option<&str>) -> JiraTransition {
    JiraTransition {
      id: id.into(),
      name: name.into(),
      to: to.map(|status| JiraIssueStatus {
        id: None,
        name: status.into(),
      }),
    }
  }

  #[test]
  fn test_select_transition_matches_target_exactly() {
    let transitions = vec![
      transition("11", "Start work", Some("In Progress")),
      transition("21", "Finish", Some("Done")),
    ];

    assert_eq!(select_transition(&transitions, "Done").map(|t| t.id.as_str()), Some("21"));
    assert!(select_transition(&transitions, "done").is_none());
    assert!(select_transition(&transitions, "Start work").is_none());
    assert!(select_transition(&transitions, "In Review").is_none());
  }

  #[test]
  fn test_select_transition_falls_back_to_name() {
    let transitions = vec![transition("31", "Done", None)];
    assert_eq!(select_transition(&transitions, "Done").map(|t| t.id.as_str()), Some("31"));
  }

  fn transitions_body() -> serde_json::Value {
    serde_json::json!({
        "transitions": [
            { "id": "11", "name": "Start work", "to": { "id": "3", "name": "In Progress" } },
            { "id": "21", "name": "Finish", "to": { "id": "10001", "name": "Done" } }
        ]
    })
  }

  #[tokio::test]
  async fn test_get_transitions() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(basic_auth("test_user", "test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_body()))
      .mount(&mock_server)
      .await;

    let transitions = client.get_transitions("TEST-123").await?;
    assert_eq!(transitions.len(), 2);
    assert_eq!(transitions[0].target_name(), "In Progress");

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_to_status_posts_matching_transition() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_body()))
      .mount(&mock_server)
      .await;

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .and(body_json(serde_json::json!({ "transition": { "id": "21" } })))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let change = client.transition_to_status("TEST-123", "Done").await?;
    assert_eq!(
      change,
      StatusChange::Applied {
        transition_id: "21".into(),
        status: "Done".into()
      }
    );

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_to_unknown_status_posts_nothing() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(200).set_body_json(transitions_body()))
      .mount(&mock_server)
      .await;

    Mock::given(method("POST"))
      .respond_with(ResponseTemplate::new(204))
      .expect(0)
      .mount(&mock_server)
      .await;

    let change = client.transition_to_status("TEST-123", "In Review").await?;
    assert_eq!(
      change,
      StatusChange::Unavailable {
        available: vec!["In Progress".into(), "Done".into()]
      }
    );

    Ok(())
  }

  #[tokio::test]
  async fn test_transition_issue_rejected() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/2/issue/TEST-123/transitions"))
      .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
          "errorMessages": ["Transition id '99' is not valid for this issue."],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let err = client.transition_issue("TEST-123", "99").await.unwrap_err();
    assert!(err.to_string().contains("is not valid for this issue"));

    Ok(())
  }
}
