//! Import rows into Jira through the REST client.

use std::collections::HashMap;

use anyhow::Result;
use jig_core::import::{ImportRow, ImportTarget};
use jig_core::normalize_issue_key;
use jig_jira::{JiraClient, NewIssue};
use tokio::runtime::Runtime;

use crate::users::{UserSpec, resolve_account_id};

/// [`ImportTarget`] that creates issues in Jira
pub struct JiraImportTarget<'a> {
  rt: &'a Runtime,
  client: &'a JiraClient,
  /// Assignee query to account id, so a repeated assignee is looked up once
  accounts: HashMap<String, Option<String>>,
}

impl<'a> JiraImportTarget<'a> {
  pub fn new(rt: &'a Runtime, client: &'a JiraClient) -> Self {
    Self {
      rt,
      client,
      accounts: HashMap::new(),
    }
  }

  fn account_for(&mut self, assignee: &str) -> Result<Option<String>> {
    if let Some(account) = self.accounts.get(assignee) {
      return Ok(account.clone());
    }

    let spec: UserSpec = assignee.parse()?;
    let account = self.rt.block_on(resolve_account_id(self.client, &spec))?;
    self.accounts.insert(assignee.to_string(), account.clone());
    Ok(account)
  }
}

impl ImportTarget for JiraImportTarget<'_> {
  fn create_issue(&mut self, project: &str, row: &ImportRow) -> Result<String> {
    let parent_key = row.epic.as_deref().map(normalize_issue_key).transpose()?;
    let issue = NewIssue {
      project_key: project.to_string(),
      summary: row.summary.clone(),
      description: row.description.clone(),
      issue_type: row.issue_type.clone(),
      parent_key,
      labels: row.labels.clone(),
    };

    let created = self.rt.block_on(self.client.create_issue(&issue))?;
    Ok(created.key)
  }

  fn assign_issue(&mut self, issue_key: &str, assignee: &str) -> Result<()> {
    let account = self.account_for(assignee)?;
    self
      .rt
      .block_on(self.client.assign_issue(issue_key, account.as_deref()))
  }
}
