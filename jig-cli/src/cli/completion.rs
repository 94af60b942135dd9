//! # Completion Command
//!
//! Prints a shell completion script for jig to stdout.

use std::io;

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{Shell, generate};

use super::Cli;

/// Command for generating shell completions
#[derive(Args)]
pub struct CompletionArgs {
  /// Shell to generate completions for
  #[arg(required = true, value_enum)]
  pub shell: Shell,
}

pub(super) fn handle_completion_command(completion: &CompletionArgs) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();
  generate(completion.shell, &mut cmd, app_name, &mut io::stdout());
  Ok(())
}
