//! # Board Command

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jig_core::table::print_table;
use jig_core::{normalize_project_key, print_header};
use jig_jira::BoardFilter;
use owo_colors::OwoColorize;

use super::issues::print_issues;
use crate::clients::create_jira_runtime_and_client;
use crate::consts::DEFAULT_LIST_LIMIT;
use crate::tables::BoardRow;

/// Command for agile boards
#[derive(Args)]
pub struct BoardArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: BoardSubcommands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardType {
  Scrum,
  Kanban,
}

impl BoardType {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Scrum => "scrum",
      Self::Kanban => "kanban",
    }
  }
}

/// Subcommands for the board command
#[derive(Subcommand)]
pub enum BoardSubcommands {
  /// List boards
  #[command(alias = "ls")]
  List {
    /// Only boards of this project
    #[arg(long, short = 'p')]
    project: Option<String>,

    /// Only scrum or kanban boards
    #[arg(long = "type", value_enum)]
    board_type: Option<BoardType>,
  },

  /// Show a board
  Show {
    /// Board ID
    id: u64,
  },

  /// List the issues on a board
  Issues {
    /// Board ID
    id: u64,

    /// Maximum number of issues to show
    #[arg(long, default_value_t = DEFAULT_LIST_LIMIT)]
    limit: u32,
  },
}

pub(super) fn handle_board_command(board: BoardArgs, config: Option<&Path>) -> Result<()> {
  match board.subcommand {
    BoardSubcommands::List { project, board_type } => {
      let filter = BoardFilter {
        project_key: project.as_deref().map(normalize_project_key).transpose()?,
        board_type: board_type.map(|t| t.as_str().to_string()),
      };

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let boards = rt.block_on(client.list_boards(&filter))?;
      print_table(boards.iter().map(BoardRow::from).collect(), "No boards found");
      Ok(())
    }
    BoardSubcommands::Show { id } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let board = rt.block_on(client.get_board(id))?;

      print_header(&format!("Board {} {}", board.id, board.name));
      println!("  {:<9} {}", "Type:".bold(), board.board_type);
      if let Some(location) = &board.location {
        if let Some(project) = &location.project_key {
          println!("  {:<9} {}", "Project:".bold(), project);
        }
        if let Some(name) = &location.display_name {
          println!("  {:<9} {}", "Location:".bold(), name);
        }
      }
      Ok(())
    }
    BoardSubcommands::Issues { id, limit } => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let issues = rt.block_on(client.get_board_issues(id, limit))?;
      print_issues(&issues, "No issues on this board");
      Ok(())
    }
  }
}
