//! # Sprint Command
//!
//! Sprints live on a scrum board. Dates are `YYYY-MM-DD` and checked locally
//! before anything is sent.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jig_core::dates::{display_date, parse_date, to_jira_timestamp, validate_date_range};
use jig_core::output::{format_key, format_sprint_state};
use jig_core::table::print_table;
use jig_core::{expand_issue_keys, print_header, print_info, print_success};
use jig_jira::{JiraSprint, NewSprint, SprintUpdate};
use owo_colors::OwoColorize;

use super::issues::print_issues;
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_LIST_LIMIT;
use crate::prompt::confirm_action;
use crate::tables::SprintRow;

/// Command for sprints
#[derive(Args)]
pub struct SprintArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: SprintSubcommands,
}

/// Sprint states accepted by `list --state`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintState {
  Future,
  Active,
  Closed,
}

impl SprintState {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Future => "future",
      Self::Active => "active",
      Self::Closed => "closed",
    }
  }
}

/// States a sprint can be moved into with `update --state`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SprintMove {
  Active,
  Closed,
}

impl SprintMove {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Active => "active",
      Self::Closed => "closed",
    }
  }
}

/// Subcommands for the sprint command
#[derive(Subcommand)]
pub enum SprintSubcommands {
  /// List the sprints of a board
  #[command(alias = "ls")]
  List {
    /// Board ID
    #[arg(long, short = 'b')]
    board: u64,

    /// Only sprints in this state
    #[arg(long, value_enum)]
    state: Option<SprintState>,
  },

  /// Show a sprint
  Show {
    /// Sprint ID
    id: u64,
  },

  /// Create a sprint
  Create {
    /// Board ID the sprint belongs to
    #[arg(long, short = 'b')]
    board: u64,

    /// Sprint name
    #[arg(long, short = 'n')]
    name: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// Sprint goal
    #[arg(long, short = 'g')]
    goal: Option<String>,
  },

  /// Change a sprint
  Update {
    /// Sprint ID
    id: u64,

    /// New name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// New start date (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,

    /// New end date (YYYY-MM-DD)
    #[arg(long)]
    end: Option<String>,

    /// New goal
    #[arg(long, short = 'g')]
    goal: Option<String>,

    /// Start or close the sprint
    #[arg(long, value_enum)]
    state: Option<SprintMove>,
  },

  /// Delete a sprint
  #[command(alias = "rm")]
  Delete {
    /// Sprint ID
    id: u64,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },

  /// Move issues into a sprint
  Add {
    /// Sprint ID
    id: u64,

    /// Issue keys, ranges (PROJ-2..PROJ-9) or comma separated lists
    #[arg(required = true)]
    keys: Vec<String>,
  },

  /// List the issues in a sprint
  Issues {
    /// Sprint ID
    id: u64,

    /// Maximum number of issues to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },
}

/// Parsed and range-checked sprint dates, as API timestamps
fn sprint_dates(start: Option<&str>, end: Option<&str>) -> Result<(Option<String>, Option<String>)> {
  let start = start.map(parse_date).transpose()?;
  let end = end.map(parse_date).transpose()?;
  validate_date_range(start, end)?;
  Ok((start.map(to_jira_timestamp), end.map(to_jira_timestamp)))
}

fn print_sprint(sprint: &JiraSprint) {
  let date = |value: &Option<String>| value.as_deref().map_or_else(|| "-".to_string(), display_date);

  print_header(&format!("Sprint {} {}", sprint.id, sprint.name));
  println!("  {:<7} {}", "State:".bold(), format_sprint_state(&sprint.state));
  println!("  {:<7} {}", "Start:".bold(), date(&sprint.start_date));
  println!("  {:<7} {}", "End:".bold(), date(&sprint.end_date));
  if let Some(board) = sprint.origin_board_id {
    println!("  {:<7} {}", "Board:".bold(), board);
  }
  if let Some(goal) = sprint.goal.as_deref().filter(|g| !g.trim().is_empty()) {
    println!("  {:<7} {}", "Goal:".bold(), goal);
  }
}

pub(super) fn handle_sprint_command(sprint: SprintArgs, config: Option<&Path>) -> Result<()> {
  match sprint.subcommand {
    SprintSubcommands::List { board, state } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let sprints = rt.block_on(client.list_sprints(board, state.map(SprintState::as_str)))?;
      print_table(sprints.iter().map(SprintRow::from).collect(), "No sprints found");
      Ok(())
    }
    SprintSubcommands::Show { id } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let sprint = rt.block_on(client.get_sprint(id))?;
      print_sprint(&sprint);
      Ok(())
    }
    SprintSubcommands::Create {
      board,
      name,
      start,
      end,
      goal,
    } => {
      if name.trim().is_empty() {
        anyhow::bail!("The sprint name must not be empty");
      }
      let (start_date, end_date) = sprint_dates(start.as_deref(), end.as_deref())?;
      let new_sprint = NewSprint {
        name: name.trim().to_string(),
        origin_board_id: board,
        start_date,
        end_date,
        goal,
      };

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let created = rt.block_on(client.create_sprint(&new_sprint))?;
      print_success(&format!("Created sprint {} ({})", created.id, created.name));
      Ok(())
    }
    SprintSubcommands::Update {
      id,
      name,
      start,
      end,
      goal,
      state,
    } => {
      let (start_date, end_date) = sprint_dates(start.as_deref(), end.as_deref())?;
      let update = SprintUpdate {
        name,
        state: state.map(|s| s.as_str().to_string()),
        start_date,
        end_date,
        goal,
      };
      if update.is_empty() {
        anyhow::bail!("Nothing to update; pass --name, --start, --end, --goal or --state");
      }

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let updated = rt.block_on(client.update_sprint(id, &update))?;
      print_success(&format!(
        "Updated sprint {} ({})",
        updated.id,
        format_sprint_state(&updated.state)
      ));
      Ok(())
    }
    SprintSubcommands::Delete { id, yes } => {
      if !confirm_action(&format!("Delete sprint {id}?"), yes)? {
        print_info("Nothing deleted");
        return Ok(());
      }

      let (rt, client) = create_jira_runtime_and_client(config)?;
      rt.block_on(client.delete_sprint(id))?;
      print_success(&format!("Deleted sprint {id}"));
      Ok(())
    }
    SprintSubcommands::Add { id, keys } => {
      let keys = expand_issue_keys(&keys)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      rt.block_on(client.add_issues_to_sprint(id, &keys))?;

      let shown: Vec<String> = keys.iter().map(|k| format_key(k)).collect();
      print_success(&format!("Moved {} issue(s) to sprint {id}: {}", keys.len(), shown.join(", ")));
      Ok(())
    }
    SprintSubcommands::Issues { id, limit } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let issues = rt.block_on(client.get_sprint_issues(id, limit))?;
      print_issues(&issues, "No issues in this sprint");
      Ok(())
    }
  }
}
