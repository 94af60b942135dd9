//! # Epic Command
//!
//! Epics are issues of type `Epic`; stories join one by having it as parent.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};
use jig_core::output::{format_key, format_url};
use jig_core::url::issue_browse_url;
use jig_core::{expand_issue_keys, normalize_issue_key, normalize_project_key, print_header, print_success};
use jig_jira::{IssueFields, KeyRef, NewIssue};

use super::issues::{delete_issues, finish_batch, for_each_key, print_issue, print_issues, update_issue_text};
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_LIST_LIMIT;
use crate::jql::IssueQuery;

/// Issue type name of epics
const EPIC_TYPE: &str = "Epic";

/// Command for epics
#[derive(Args)]
pub struct EpicArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: EpicSubcommands,
}

/// Subcommands for the epic command
#[derive(Subcommand)]
pub enum EpicSubcommands {
  /// Create an epic
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
  },

  /// List the epics of a project
  #[command(alias = "ls")]
  List {
    /// Project key (e.g. PROJ)
    #[arg(long, short = 'p')]
    project: String,

    /// Maximum number of epics to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },

  /// Show an epic
  Show {
    /// Epic key (e.g. PROJ-1)
    key: String,
  },

  /// Change an epic's summary or description
  Update {
    /// Epic key (e.g. PROJ-1)
    key: String,

    /// New summary
    #[arg(long, short = 's')]
    summary: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    description: Option<String>,
  },

  /// Delete an epic
  #[command(alias = "rm")]
  Delete {
    /// Epic key (e.g. PROJ-1)
    key: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },

  /// Add stories to an epic
  Add {
    /// Epic key (e.g. PROJ-1)
    epic: String,

    /// Story keys, ranges (PROJ-2..PROJ-9) or comma separated lists
    #[arg(required = true)]
    keys: Vec<String>,
  },

  /// List the stories in an epic
  Stories {
    /// Epic key (e.g. PROJ-1)
    epic: String,

    /// Maximum number of stories to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },
}

pub(super) fn handle_epic_command(epic: EpicArgs, config: Option<&Path>) -> Result<()> {
  match epic.subcommand {
    EpicSubcommands::Create {
      project,
      summary,
      description,
    } => {
      if summary.trim().is_empty() {
        anyhow::bail!("The summary must not be empty");
      }
      let issue = NewIssue {
        project_key: normalize_project_key(&project)?,
        summary: summary.trim().to_string(),
        description,
        issue_type: EPIC_TYPE.to_string(),
        parent_key: None,
        labels: Vec::new(),
      };

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let created = rt.block_on(client.create_issue(&issue))?;
      print_success(&format!("Created epic {}", format_key(&created.key)));
      println!("  {}", format_url(&issue_browse_url(client.base_url(), &created.key)));
      Ok(())
    }
    EpicSubcommands::List { project, limit } => {
      let project = normalize_project_key(&project)?;
      let query = IssueQuery {
        project: Some(project.clone()),
        issue_type: Some(EPIC_TYPE.to_string()),
        ..Default::default()
      };

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let epics = rt.block_on(client.search_issues(&query.to_jql(), limit))?;
      print_header(&format!("Epics in {}", format_key(&project)));
      print_issues(&epics, "No epics found");
      Ok(())
    }
    EpicSubcommands::Show { key } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let epic = rt.block_on(client.get_issue(&key))?;
      print_issue(&epic, client.base_url());
      Ok(())
    }
    EpicSubcommands::Update {
      key,
      summary,
      description,
    } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      update_issue_text(&rt, &client, &key, summary, description)
    }
    EpicSubcommands::Delete { key, yes } => {
      let key = normalize_issue_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      delete_issues(&rt, &client, &[key], yes)
    }
    EpicSubcommands::Add { epic, keys } => handle_add_command(&epic, &keys, config),
    EpicSubcommands::Stories { epic, limit } => {
      let epic = normalize_issue_key(&epic)?;
      let query = IssueQuery {
        parent: Some(epic.clone()),
        ..Default::default()
      };

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let stories = rt.block_on(client.search_issues(&query.to_jql(), limit))?;
      print_header(&format!("Stories in {}", format_key(&epic)));
      print_issues(&stories, "No stories found");
      Ok(())
    }
  }
}

fn handle_add_command(epic: &str, keys: &[String], config: Option<&Path>) -> Result<()> {
  let epic = normalize_issue_key(epic)?;
  let keys = expand_issue_keys(keys)?;
  if keys.contains(&epic) {
    anyhow::bail!("{epic} cannot be added to itself");
  }

  let (rt, client) = create_jira_runtime_and_client(config)?;
  let failed = for_each_key(&keys, |key| {
    let fields = IssueFields {
      parent: Some(KeyRef { key: epic.clone() }),
      ..Default::default()
    };
    rt.block_on(client.update_issue(key, fields))?;
    print_success(&format!("Added {} to {}", format_key(key), format_key(&epic)));
    Ok(())
  });

  finish_batch("add", keys.len(), failed)
}
