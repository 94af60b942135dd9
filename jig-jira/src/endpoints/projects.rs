use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::JiraClient;
use crate::error::api_error;
use crate::models::{CreatedProject, JiraProject, NewProject, ProjectUpdate};

impl JiraClient {
  /// List every project visible to the user
  pub async fn list_projects(&self) -> Result<Vec<JiraProject>> {
    let response = self
      .request(Method::GET, "/rest/api/2/project")
      .query(&[("expand", "lead,description")])
      .send()
      .await
      .context("Failed to list Jira projects")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<Vec<JiraProject>>()
          .await
          .context("Failed to parse Jira projects")?,
      ),
      _ => Err(api_error(response, "Projects").await),
    }
  }

  /// Get a project by key
  pub async fn get_project(&self, project_key: &str) -> Result<JiraProject> {
    let response = self
      .request(Method::GET, &format!("/rest/api/2/project/{project_key}"))
      .send()
      .await
      .context("Failed to fetch Jira project")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<JiraProject>()
          .await
          .context("Failed to parse Jira project")?,
      ),
      _ => Err(api_error(response, &format!("Project {project_key}")).await),
    }
  }

  /// Create a project
  pub async fn create_project(&self, project: &NewProject) -> Result<CreatedProject> {
    let response = self
      .request(Method::POST, "/rest/api/2/project")
      .json(project)
      .send()
      .await
      .context("Failed to create Jira project")?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        let created = response
          .json::<CreatedProject>()
          .await
          .context("Failed to parse created Jira project")?;
        info!("Created project {}", created.key);
        Ok(created)
      }
      _ => Err(api_error(response, &format!("Project {}", project.key)).await),
    }
  }

  /// Edit a project's name, description or lead
  pub async fn update_project(&self, project_key: &str, update: &ProjectUpdate) -> Result<JiraProject> {
    if update.is_empty() {
      anyhow::bail!("No fields given to update on project {project_key}");
    }

    let response = self
      .request(Method::PUT, &format!("/rest/api/2/project/{project_key}"))
      .json(update)
      .send()
      .await
      .context("Failed to update Jira project")?;

    match response.status() {
      StatusCode::OK | StatusCode::CREATED => Ok(
        response
          .json::<JiraProject>()
          .await
          .context("Failed to parse updated Jira project")?,
      ),
      _ => Err(api_error(response, &format!("Project {project_key}")).await),
    }
  }

  /// Delete a project
  pub async fn delete_project(&self, project_key: &str) -> Result<()> {
    let response = self
      .request(Method::DELETE, &format!("/rest/api/2/project/{project_key}"))
      .send()
      .await
      .context("Failed to delete Jira project")?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK | StatusCode::ACCEPTED => {
        info!("Deleted project {project_key}");
        Ok(())
      }
      _ => Err(api_error(response, &format!("Project {project_key}")).await),
    }
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::test_client;
  use crate::error::JiraApiError;
  use crate::models::{NewProject, ProjectUpdate};

  #[tokio::test]
  async fn test_list_projects() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("GET"))
      .and(path("/rest/api/2/project"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
          {
              "id": "10000",
              "key": "PROJ",
              "name": "Project",
              "projectTypeKey": "software",
              "lead": { "accountId": "me-123", "displayName": "Test User" }
          },
          { "id": "10001", "key": "OPS", "name": "Operations" }
      ])))
      .mount(&mock_server)
      .await;

    let projects = client.list_projects().await?;
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].project_type_key.as_deref(), Some("software"));
    assert!(projects[1].lead.is_none());

    Ok(())
  }

  #[tokio::test]
  async fn test_create_project() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("POST"))
      .and(path("/rest/api/2/project"))
      .and(body_json(serde_json::json!({
          "key": "NEW",
          "name": "New project",
          "projectTypeKey": "software",
          "leadAccountId": "me-123"
      })))
      .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
          "id": 10010,
          "key": "NEW",
          "self": "https://test.atlassian.net/rest/api/2/project/10010"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let created = client
      .create_project(&NewProject {
        key: "NEW".into(),
        name: "New project".into(),
        project_type_key: "software".into(),
        lead_account_id: "me-123".into(),
        description: None,
      })
      .await?;
    assert_eq!(created.id, 10010);

    Ok(())
  }

  #[tokio::test]
  async fn test_update_project() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("PUT"))
      .and(path("/rest/api/2/project/PROJ"))
      .and(body_json(serde_json::json!({ "name": "Renamed" })))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "id": "10000", "key": "PROJ", "name": "Renamed"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    let project = client
      .update_project(
        "PROJ",
        &ProjectUpdate {
          name: Some("Renamed".into()),
          ..Default::default()
        },
      )
      .await?;
    assert_eq!(project.name, "Renamed");

    Ok(())
  }

  #[tokio::test]
  async fn test_delete_project_not_found() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("DELETE"))
      .and(path("/rest/api/2/project/GONE"))
      .respond_with(ResponseTemplate::new(404))
      .mount(&mock_server)
      .await;

    let err = client.delete_project("GONE").await.unwrap_err();
    assert_eq!(err.to_string(), "Project GONE not found");
    assert!(err.downcast_ref::<JiraApiError>().is_some());

    Ok(())
  }

  #[tokio::test]
  async fn test_delete_project() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("DELETE"))
      .and(path("/rest/api/2/project/PROJ"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    client.delete_project("PROJ").await?;
    Ok(())
  }

  #[tokio::test]
  async fn test_delete_project_forbidden() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = test_client(&mock_server.uri());

    Mock::given(method("DELETE"))
      .and(path("/rest/api/2/project/LOCKED"))
      .respond_with(ResponseTemplate::new(403))
      .mount(&mock_server)
      .await;

    let err = client.delete_project("LOCKED").await.unwrap_err();
    assert_eq!(
      err.downcast_ref::<JiraApiError>(),
      Some(&JiraApiError::Forbidden("Project LOCKED".into()))
    );

    Ok(())
  }
}
