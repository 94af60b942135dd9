//! # Agile Board Endpoints
//!
//! Board listing and lookup on the agile 1.0 API, plus the paging helper the
//! sprint endpoints share.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::JiraClient;
use crate::consts::PAGE_SIZE;
use crate::error::api_error;
use crate::models::{AgilePage, JiraBoard, JiraIssue};

/// Board filters for [`JiraClient::list_boards`]
#[derive(Debug, Default, Clone)]
pub struct BoardFilter {
  pub project_key: Option<String>,
  /// `scrum` or `kanban`
  pub board_type: Option<String>,
}

impl JiraClient {
  /// Collect every value of an agile listing, following `startAt` until `isLast`
  pub(crate) async fn agile_pages<T: DeserializeOwned>(
    &self,
    path: &str,
    filters: &[(&str, String)],
    subject: &str,
  ) -> Result<Vec<T>> {
    let mut values = Vec::new();
    let mut start_at = 0u32;

    loop {
      let response = self
        .request(Method::GET, path)
        .query(filters)
        .query(&[("startAt", start_at), ("maxResults", PAGE_SIZE)])
        .send()
        .await
        .with_context(|| format!("Failed to list {subject}"))?;

      let page = match response.status() {
        StatusCode::OK => response
          .json::<AgilePage<T>>()
          .await
          .with_context(|| format!("Failed to parse {subject}"))?,
        _ => return Err(api_error(response, subject).await),
      };

      let fetched = page.values.len() as u32;
      debug!("{subject}: {fetched} values from {start_at}");
      values.extend(page.values);

      if page.is_last || fetched == 0 {
        break;
      }
      start_at += fetched;
    }

    Ok(values)
  }

  /// List boards, optionally narrowed to a project or board type
  pub async fn list_boards(&self, filter: &BoardFilter) -> Result<Vec<JiraBoard>> {
    let mut query = Vec::new();
    if let Some(project) = &filter.project_key {
      query.push(("projectKeyOrId", project.clone()));
    }
    if let Some(board_type) = &filter.board_type {
      query.push(("type", board_type.clone()));
    }

    self.agile_pages("/rest/agile/1.0/board", &query, "Boards").await
  }

  /// Get a board by id
  pub async fn get_board(&self, board_id: u64) -> Result<JiraBoard> {
    let response = self
      .request(Method::GET, &format!("/rest/agile/1.0/board/{board_id}"))
      .send()
      .await
      .context("Failed to fetch Jira board")?;

    match response.status() {
      StatusCode::OK => Ok(response.json::<JiraBoard>().await.context("Failed to parse Jira board")?),
      _ => Err(api_error(response, &format!("Board {board_id}")).await),
    }
  }

  /// Issues on a board, at most `limit`
  pub async fn get_board_issues(&self, board_id: u64, limit: u32) -> Result<Vec<JiraIssue>> {
    self
      .collect_issues(
        &format!("/rest/agile/1.0/board/{board_id}/issue"),
        None,
        &format!("Board {board_id}"),
        limit,
      )
      .await
  }
}
