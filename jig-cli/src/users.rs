//! Resolving `--user`, `--assignee` and `--lead` values to Jira accounts.

use std::convert::Infallible;
use std::str::FromStr;

use anyhow::{Context, Result};
use jig_jira::JiraClient;
use tracing::debug;

/// A user as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSpec {
  /// `me`: the owner of the API token
  Me,
  /// `none`: nobody, used to unassign
  Nobody,
  /// Anything else, looked up by email or name
  Query(String),
}

impl FromStr for UserSpec {
  type Err = Infallible;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let trimmed = s.trim();
    Ok(match trimmed.to_ascii_lowercase().as_str() {
      "me" => Self::Me,
      "none" | "unassigned" => Self::Nobody,
      _ => Self::Query(trimmed.to_string()),
    })
  }
}

/// Account id for `spec`; `None` means nobody
pub async fn resolve_account_id(client: &JiraClient, spec: &UserSpec) -> Result<Option<String>> {
  let user = match spec {
    UserSpec::Nobody => return Ok(None),
    UserSpec::Me => client.get_myself().await?,
    UserSpec::Query(query) => client.find_user(query).await?,
  };

  debug!("Resolved {spec:?} to {}", user.display_name);
  user
    .account_id
    .map(Some)
    .with_context(|| format!("Jira user '{}' has no account id", user.display_name))
}

/// Like [`resolve_account_id`], but someone must be named
pub async fn require_account_id(client: &JiraClient, spec: &UserSpec) -> Result<String> {
  resolve_account_id(client, spec)
    .await?
    .context("A user is required here; 'none' is not allowed")
}
