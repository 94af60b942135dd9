//! JQL search, walking result pages until the limit is reached.
//!
//! Board and sprint issue listings return the same page shape and share the
//! paging loop.

use anyhow::{Context, Result};
use reqwest::{Method, StatusCode};
use tracing::debug;

use crate::client::JiraClient;
use crate::consts::PAGE_SIZE;
use crate::error::api_error;
use crate::models::{JiraIssue, SearchResults};

/// Fields requested for search results
const SEARCH_FIELDS: &str = "summary,status,issuetype,assignee,parent,labels,created,updated";

impl JiraClient {
  /// Run a JQL query and return at most `limit` issues
  pub async fn search_issues(&self, jql: &str, limit: u32) -> Result<Vec<JiraIssue>> {
    self.collect_issues("/rest/api/2/search", Some(jql), "Search", limit).await
  }

  /// Walk an issue-page endpoint until `limit` issues or the last page
  pub(crate) async fn collect_issues(
    &self,
    path: &str,
    jql: Option<&str>,
    subject: &str,
    limit: u32,
  ) -> Result<Vec<JiraIssue>> {
    let mut issues = Vec::new();
    let mut start_at = 0u32;

    while (issues.len() as u32) < limit {
      let page_size = PAGE_SIZE.min(limit - issues.len() as u32);
      let page = self.issue_page(path, jql, subject, start_at, page_size).await?;
      let fetched = page.issues.len() as u32;
      debug!("{subject} page at {start_at}: {fetched} of {} issues", page.total);

      issues.extend(page.issues);
      start_at += fetched;
      if fetched == 0 || start_at >= page.total {
        break;
      }
    }

    issues.truncate(limit as usize);
    Ok(issues)
  }

  async fn issue_page(
    &self,
    path: &str,
    jql: Option<&str>,
    subject: &str,
    start_at: u32,
    max_results: u32,
  ) -> Result<SearchResults> {
    let mut query = vec![
      ("startAt", start_at.to_string()),
      ("maxResults", max_results.to_string()),
      ("fields", SEARCH_FIELDS.to_string()),
    ];
    if let Some(jql) = jql {
      query.push(("jql", jql.to_string()));
    }

    let response = self
      .request(Method::GET, path)
      .query(&query)
      .send()
      .await
      .context("Failed to fetch Jira issues")?;

    match response.status() {
      StatusCode::OK => Ok(
        response
          .json::<SearchResults>()
          .await
          .context("Failed to parse Jira search results")?,
      ),
      _ => Err(api_error(response, subject).await),
    }
  }
}
