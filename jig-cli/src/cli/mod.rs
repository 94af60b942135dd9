//! # Command Line Interface
//!
//! Defines the CLI structure and dispatches each subcommand to its handler.

mod board;
mod completion;
mod config;
mod epic;
mod issues;
mod project;
mod sprint;
mod story;

use std::path::PathBuf;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use jig_core::ColorMode;
use jig_jira::JiraApiError;

use crate::consts::VERSION;

/// Top-level CLI command for jig
#[derive(Parser)]
#[command(name = "jig")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Jira automation from the command line")]
#[command(
  long_about = "jig creates, updates and deletes Jira projects, epics, stories and sprints,\n\
        and lists boards, issues and comments as compact terminal tables.\n\n\
        Connection settings are read from a JSON config file; run 'jig config init' to create one."
)]
#[command(version = VERSION)]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    global = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Path of the config file (defaults to $JIG_CONFIG, then the user config directory)
  #[arg(long = "config", id = "config_path", global = true, value_name = "PATH")]
  pub config: Option<PathBuf>,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for jig
#[derive(Subcommand)]
pub enum Commands {
  /// Agile boards
  #[command(long_about = "List agile boards and the issues on them.\n\n\
            Boards can be narrowed to a project or to scrum or kanban boards.")]
  Board(board::BoardArgs),

  /// Generate shell completions
  #[command(long_about = "Generates shell completion scripts for jig commands.\n\n\
            Write the output to your shell's completion directory, for example:\n\
            jig completion bash > ~/.local/share/bash-completion/completions/jig")]
  Completion(completion::CompletionArgs),

  /// Config file management
  #[command(long_about = "Create, show and check the jig config file.\n\n\
            The file holds the Jira URL, user and API token. JIRA_URL, JIRA_USER and\n\
            JIRA_API_TOKEN override the stored values when set.")]
  #[command(arg_required_else_help = true)]
  Config(config::ConfigArgs),

  /// Epic management
  #[command(long_about = "Create and manage epics and the stories that belong to them.")]
  Epic(epic::EpicArgs),

  /// Project management
  #[command(alias = "proj")]
  Project(project::ProjectArgs),

  /// Sprint management
  #[command(long_about = "Create, update and delete sprints on a scrum board and move issues into them.\n\n\
            Dates are given as YYYY-MM-DD and sent to Jira as midnight UTC.")]
  Sprint(sprint::SprintArgs),

  /// Story and issue management
  #[command(long_about = "Create, update, transition, assign, comment on and delete issues.\n\n\
            Commands that accept several keys also take ranges such as PROJ-10..PROJ-20\n\
            and comma separated lists.")]
  #[command(alias = "issue")]
  Story(story::StoryArgs),

  /// Intentionally panic (for testing the crash handler)
  #[command(hide = true)]
  Panic,
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  cli.colors.apply();
  let config = cli.config.as_deref();

  match cli.command {
    Commands::Board(board) => board::handle_board_command(board, config),
    Commands::Completion(completion) => completion::handle_completion_command(&completion),
    Commands::Config(args) => config::handle_config_command(args, config),
    Commands::Epic(epic) => epic::handle_epic_command(epic, config),
    Commands::Project(project) => project::handle_project_command(project, config),
    Commands::Sprint(sprint) => sprint::handle_sprint_command(sprint, config),
    Commands::Story(story) => story::handle_story_command(story, config),
    Commands::Panic => {
      panic!("This is an intentional test panic to verify the crash handler");
    }
  }
}

/// Classify a failed command for the log: Jira refused, or something else broke
pub fn describe_failure(err: &anyhow::Error) -> String {
  match err.downcast_ref::<JiraApiError>() {
    Some(api_error) => format!("Jira API error: {api_error}"),
    None => format!("Unexpected error: {err}"),
  }
}
