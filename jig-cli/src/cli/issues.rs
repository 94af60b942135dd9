//! Helpers shared by the story and epic commands.

use anyhow::Result;
use jig_core::output::{format_key, format_status, format_url};
use jig_core::table::print_table;
use jig_core::url::issue_browse_url;
use jig_core::{expand_issue_keys, print_error, print_header, print_info, print_success, print_warning};
use jig_jira::{IssueFields, JiraClient, JiraIssue};
use owo_colors::OwoColorize;
use tokio::runtime::Runtime;

use crate::prompt::confirm_action;
use crate::tables::issue_rows;

/// Print the details of one issue
pub(super) fn print_issue(issue: &JiraIssue, base_url: &str) {
  let fields = &issue.fields;

  print_header(&format!("{} {}", format_key(&issue.key), fields.summary));
  println!("  {:<10} {}", "Status:".bold(), format_status(&fields.status.name));
  if let Some(issue_type) = &fields.issue_type {
    println!("  {:<10} {}", "Type:".bold(), issue_type.name);
  }
  println!(
    "  {:<10} {}",
    "Assignee:".bold(),
    fields
      .assignee
      .as_ref()
      .map_or("Unassigned", |user| user.display_name.as_str())
  );
  if let Some(parent) = &fields.parent {
    println!("  {:<10} {}", "Parent:".bold(), format_key(&parent.key));
  }
  if !fields.labels.is_empty() {
    println!("  {:<10} {}", "Labels:".bold(), fields.labels.join(", "));
  }
  println!(
    "  {:<10} {}",
    "URL:".bold(),
    format_url(&issue_browse_url(base_url, &issue.key))
  );

  match fields.description.as_deref().map(str::trim) {
    Some(description) if !description.is_empty() => {
      print_header("Description");
      println!("{description}");
    }
    _ => {}
  }
}

/// Print a list of issues as a table
pub(super) fn print_issues(issues: &[JiraIssue], empty_message: &str) {
  print_table(issue_rows(issues), empty_message);
  if !issues.is_empty() {
    println!("  {} issue(s)", issues.len());
  }
}

/// Edit summary and/or description
pub(super) fn update_issue_text(
  rt: &Runtime,
  client: &JiraClient,
  key: &str,
  summary: Option<String>,
  description: Option<String>,
) -> Result<()> {
  let fields = IssueFields {
    summary,
    description,
    ..Default::default()
  };
  if fields.is_empty() {
    anyhow::bail!("Nothing to update; pass --summary and/or --description");
  }

  rt.block_on(client.update_issue(key, fields))?;
  print_success(&format!("Updated {}", format_key(key)));
  Ok(())
}

/// Delete every key in `keys` after one confirmation.
///
/// Keeps going past failures; the command fails when any delete did.
pub(super) fn delete_issues(rt: &Runtime, client: &JiraClient, keys: &[String], assume_yes: bool) -> Result<()> {
  let keys = expand_issue_keys(keys)?;
  let prompt = match keys.as_slice() {
    [key] => format!("Delete {key} and its subtasks?"),
    _ => format!("Delete {} issues ({}) and their subtasks?", keys.len(), keys.join(", ")),
  };

  if !confirm_action(&prompt, assume_yes)? {
    print_info("Nothing deleted");
    return Ok(());
  }

  let failed = for_each_key(&keys, |key| {
    rt.block_on(client.delete_issue(key))?;
    print_success(&format!("Deleted {}", format_key(key)));
    Ok(())
  });

  finish_batch("delete", keys.len(), failed)
}

/// Run `action` for every key, printing failures as they happen.
///
/// Returns how many keys failed.
pub(super) fn for_each_key<F>(keys: &[String], mut action: F) -> usize
where
  F: FnMut(&str) -> Result<()>,
{
  let mut failed = 0;
  for key in keys {
    if let Err(e) = action(key) {
      print_error(&format!("{key}: {e:#}"));
      failed += 1;
    }
  }
  failed
}

/// Turn a failure count into the command result
pub(super) fn finish_batch(verb: &str, total: usize, failed: usize) -> Result<()> {
  if failed == 0 {
    return Ok(());
  }
  if failed < total {
    print_warning(&format!("{} of {total} succeeded", total - failed));
  }
  anyhow::bail!("Could not {verb} {failed} of {total} issue(s)")
}
