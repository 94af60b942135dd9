//! # Story Command
//!
//! Issue-level operations: create, show, update, delete, list, transition,
//! assign, comment, import from CSV and free JQL search.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jig_core::import::{DEFAULT_ISSUE_TYPE, ImportReport, read_import_file, run_import};
use jig_core::output::{format_key, format_status, format_url};
use jig_core::table::print_table;
use jig_core::url::issue_browse_url;
use jig_core::{
  expand_issue_keys, normalize_issue_key, normalize_project_key, print_header, print_info, print_success,
  print_warning,
};
use jig_jira::{JiraClient, NewIssue, StatusChange};
use tracing::info;

use super::issues::{delete_issues, finish_batch, for_each_key, print_issue, print_issues, update_issue_text};
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_LIST_LIMIT;
use crate::import::JiraImportTarget;
use crate::jql::{AssigneeFilter, IssueQuery};
use crate::tables::{CommentRow, ImportPreviewRow};
use crate::users::{UserSpec, require_account_id, resolve_account_id};

/// Command for stories and other issues
#[derive(Args)]
pub struct StoryArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: StorySubcommands,
}

/// Subcommands for the story command
#[derive(Subcommand)]
pub enum StorySubcommands {
  /// Create a story
  Create {
    /// Project key (e.g. PROJ)
    #[arg(long, short = 'p')]
    project: String,

    /// One-line summary
    #[arg(long, short = 's')]
    summary: String,

    /// Longer description
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// Issue type
    #[arg(long = "type", short = 't', default_value = DEFAULT_ISSUE_TYPE)]
    issue_type: String,

    /// Epic to file the story under
    #[arg(long)]
    epic: Option<String>,

    /// Assignee: email, name or 'me'
    #[arg(long, short = 'a')]
    assignee: Option<UserSpec>,

    /// Label to add (repeatable)
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,
  },

  /// Show a story
  #[command(alias = "view")]
  Show {
    /// Issue key (e.g. PROJ-123)
    key: String,
  },

  /// Change a story's summary or description
  Update {
    /// Issue key (e.g. PROJ-123)
    key: String,

    /// New summary
    #[arg(long, short = 's')]
    summary: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    description: Option<String>,
  },

  /// Delete stories and their subtasks
  #[command(alias = "rm")]
  Delete {
    /// Issue keys, ranges (PROJ-1..PROJ-5) or comma separated lists
    #[arg(required = true)]
    keys: Vec<String>,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },

  /// List stories in a project
  #[command(alias = "ls")]
  List {
    /// Project key (e.g. PROJ)
    #[arg(long, short = 'p')]
    project: String,

    /// Only issues in this status
    #[arg(long)]
    status: Option<String>,

    /// Only issues assigned to this user ('me', 'none', email or name)
    #[arg(long, short = 'a')]
    assignee: Option<UserSpec>,

    /// Only issues of this type
    #[arg(long = "type", short = 't')]
    issue_type: Option<String>,

    /// Maximum number of issues to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },

  /// Move stories to a workflow status
  #[command(long_about = "Move issues to a workflow status.\n\n\
                         The status name must match the target of one of the issue's available\n\
                         transitions exactly. When none does, the issue is left alone and the\n\
                         statuses it can move to are listed.")]
  #[command(alias = "transition")]
  Status {
    /// Issue keys, ranges (PROJ-1..PROJ-5) or comma separated lists
    #[arg(required = true)]
    keys: Vec<String>,

    /// Target status name (e.g. "In Progress")
    #[arg(long)]
    to: String,
  },

  /// Assign stories to a user
  Assign {
    /// Issue keys, ranges (PROJ-1..PROJ-5) or comma separated lists
    #[arg(required = true)]
    keys: Vec<String>,

    /// 'me', 'none' to unassign, or an email address or name
    #[arg(long, short = 'u')]
    user: UserSpec,
  },

  /// Add a comment to a story
  Comment {
    /// Issue key (e.g. PROJ-123)
    key: String,

    /// Comment text
    #[arg(long, short = 'b')]
    body: String,
  },

  /// List the comments on a story
  Comments {
    /// Issue key (e.g. PROJ-123)
    key: String,
  },

  /// Create stories from a CSV file
  #[command(long_about = "Create one issue per row of a CSV file.\n\n\
                         The header row names the columns: summary (required), description,\n\
                         issue_type, assignee, epic and labels (separated by ';').\n\
                         Rows without a summary are skipped. The assignee is only set on\n\
                         issues that were created.")]
  Import {
    /// CSV file to read
    file: PathBuf,

    /// Project key (e.g. PROJ)
    #[arg(long, short = 'p')]
    project: String,

    /// Only show what would be created
    #[arg(long)]
    dry_run: bool,
  },

  /// Search issues with JQL
  Search {
    /// JQL query
    #[arg(long)]
    jql: String,

    /// Maximum number of issues to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },

  /// Open a story in the browser
  Open {
    /// Issue key (e.g. PROJ-123)
    key: String,
  },
}

pub(super) fn handle_story_command(story: StoryArgs, config: Option<&Path>) -> Result<()> {
  match story.subcommand {
    StorySubcommands::Create {
      project,
      summary,
      description,
      issue_type,
      epic,
      assignee,
      labels,
    } => {
      let issue = NewIssue {
        project_key: normalize_project_key(&project)?,
        summary: non_empty("summary", summary)?,
        description,
        issue_type,
        parent_key: epic.as_deref().map(normalize_issue_key).transpose()?,
        labels,
      };
      handle_create_command(&issue, assignee.as_ref(), config)
    }
    StorySubcommands::Show { key } => handle_show_command(&normalize_issue_key(&key)?, config),
    StorySubcommands::Update {
      key,
      summary,
      description,
    } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      update_issue_text(&rt, &client, &key, summary, description)
    }
    StorySubcommands::Delete { keys, yes } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      delete_issues(&rt, &client, &keys, yes)
    }
    StorySubcommands::List {
      project,
      status,
      assignee,
      issue_type,
      limit,
    } => handle_list_command(&project, status, assignee, issue_type, limit, config),
    StorySubcommands::Status { keys, to } => handle_status_command(&keys, &to, config),
    StorySubcommands::Assign { keys, user } => handle_assign_command(&keys, &user, config),
    StorySubcommands::Comment { key, body } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      rt.block_on(client.add_comment(&key, &body))?;
      print_success(&format!("Added comment to {}", format_key(&key)));
      Ok(())
    }
    StorySubcommands::Comments { key } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let comments = rt.block_on(client.get_comments(&key))?;
      print_header(&format!("Comments on {}", format_key(&key)));
      print_table(comments.iter().map(CommentRow::from).collect(), "No comments found");
      Ok(())
    }
    StorySubcommands::Import {
      file,
      project,
      dry_run,
    } => handle_import_command(&file, &normalize_project_key(&project)?, dry_run, config),
    StorySubcommands::Search { jql, limit } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let issues = rt.block_on(client.search_issues(&jql, limit))?;
      print_issues(&issues, "No issues found");
      Ok(())
    }
    StorySubcommands::Open { key } => {
      let key = normalize_issue_key(&key)?;
      let config = crate::clients::load_config(config)?;
      let url = issue_browse_url(&config.jira_url, &key);
      open::that(&url).with_context(|| format!("Failed to open {url} in the browser"))?;
      print_info(&format!("Opened {}", format_url(&url)));
      Ok(())
    }
  }
}

fn non_empty(field: &str, value: String) -> Result<String> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    anyhow::bail!("The {field} must not be empty");
  }
  Ok(trimmed.to_string())
}

fn handle_create_command(issue: &NewIssue, assignee: Option<&UserSpec>, config: Option<&Path>) -> Result<()> {
  let (rt, client) = create_jira_runtime_and_client(config)?;

  let created = rt.block_on(client.create_issue(issue))?;
  print_success(&format!(
    "Created {} {}",
    issue.issue_type.to_lowercase(),
    format_key(&created.key)
  ));
  println!("  {}", format_url(&issue_browse_url(client.base_url(), &created.key)));

  if let Some(spec) = assignee {
    rt.block_on(assign_new_issue(&client, &created.key, spec))
      .with_context(|| format!("{} was created but could not be assigned", created.key))?;
    print_success(&format!("Assigned {}", format_key(&created.key)));
  }

  Ok(())
}

/// Resolve `spec` and assign `key`; both steps fail as one
async fn assign_new_issue(client: &JiraClient, key: &str, spec: &UserSpec) -> Result<()> {
  let account = resolve_account_id(client, spec).await?;
  client.assign_issue(key, account.as_deref()).await
}

fn handle_show_command(key: &str, config: Option<&Path>) -> Result<()> {
  let (rt, client) = create_jira_runtime_and_client(config)?;
  let issue = rt.block_on(client.get_issue(key))?;
  print_issue(&issue, client.base_url());
  Ok(())
}

fn handle_list_command(
  project: &str,
  status: Option<String>,
  assignee: Option<UserSpec>,
  issue_type: Option<String>,
  limit: u32,
  config: Option<&Path>,
) -> Result<()> {
  let project = normalize_project_key(project)?;
  let (rt, client) = create_jira_runtime_and_client(config)?;

  let assignee = match assignee {
    None => None,
    Some(UserSpec::Me) => Some(AssigneeFilter::CurrentUser),
    Some(UserSpec::Nobody) => Some(AssigneeFilter::Unassigned),
    Some(spec) => Some(AssigneeFilter::Account(rt.block_on(require_account_id(&client, &spec))?)),
  };

  let query = IssueQuery {
    project: Some(project.clone()),
    issue_type,
    status,
    assignee,
    parent: None,
  };
  let jql = query.to_jql();
  info!("Listing issues with JQL: {jql}");

  let issues = rt.block_on(client.search_issues(&jql, limit))?;
  print_header(&format!("Issues in {}", format_key(&project)));
  print_issues(&issues, "No issues found");
  Ok(())
}

fn handle_status_command(keys: &[String], status: &str, config: Option<&Path>) -> Result<()> {
  let keys = expand_issue_keys(keys)?;
  let (rt, client) = create_jira_runtime_and_client(config)?;

  let failed = for_each_key(&keys, |key| {
    match rt.block_on(client.transition_to_status(key, status))? {
      StatusChange::Applied { status, .. } => {
        print_success(&format!("{} is now {}", format_key(key), format_status(&status)));
        Ok(())
      }
      StatusChange::Unavailable { available } if available.is_empty() => {
        anyhow::bail!("no transitions are available")
      }
      StatusChange::Unavailable { available } => {
        anyhow::bail!("cannot move to '{status}'; available: {}", available.join(", "))
      }
    }
  });

  finish_batch("transition", keys.len(), failed)
}

fn handle_assign_command(keys: &[String], user: &UserSpec, config: Option<&Path>) -> Result<()> {
  let keys = expand_issue_keys(keys)?;
  let (rt, client) = create_jira_runtime_and_client(config)?;

  // One lookup for the whole batch
  let account = rt.block_on(resolve_account_id(&client, user))?;
  let who = match user {
    UserSpec::Nobody => "nobody".to_string(),
    UserSpec::Me => "you".to_string(),
    UserSpec::Query(query) => query.clone(),
  };

  let failed = for_each_key(&keys, |key| {
    rt.block_on(client.assign_issue(key, account.as_deref()))?;
    print_success(&format!("Assigned {} to {who}", format_key(key)));
    Ok(())
  });

  finish_batch("assign", keys.len(), failed)
}

fn handle_import_command(file: &Path, project: &str, dry_run: bool, config: Option<&Path>) -> Result<()> {
  let parsed = read_import_file(file)?;

  for skipped in &parsed.skipped {
    print_warning(&format!("Row {} skipped: {}", skipped.row, skipped.reason));
  }
  if parsed.rows.is_empty() {
    anyhow::bail!("No importable rows in {}", file.display());
  }

  if dry_run {
    print_header(&format!("Would create {} issue(s) in {}", parsed.rows.len(), format_key(project)));
    print_table(
      parsed.rows.iter().map(ImportPreviewRow::from).collect(),
      "Nothing to import",
    );
    return Ok(());
  }

  let (rt, client) = create_jira_runtime_and_client(config)?;
  let mut target = JiraImportTarget::new(&rt, &client);
  let report = run_import(&mut target, project, &parsed);

  print_import_report(&report);
  if report.is_clean() {
    Ok(())
  } else {
    anyhow::bail!(
      "Import finished with {} failed row(s) and {} failed assignment(s)",
      report.failed.len(),
      report.assign_failed.len()
    )
  }
}

fn print_import_report(report: &ImportReport) {
  for (row, key) in &report.created {
    print_success(&format!("Row {row}: created {}", format_key(key)));
  }
  for (row, error) in &report.failed {
    jig_core::print_error(&format!("Row {row}: {error}"));
  }
  for (key, error) in &report.assign_failed {
    print_warning(&format!("{key}: assignee not set: {error}"));
  }

  print_header("Import summary");
  println!("  Created:           {}", report.created.len());
  println!("  Skipped:           {}", report.skipped.len());
  println!("  Failed:            {}", report.failed.len());
  println!("  Assignee failures: {}", report.assign_failed.len());
}
