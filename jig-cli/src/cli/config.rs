//! # Config Command
//!
//! Writes, shows and checks the JSON config file.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use jig_core::config::{JigConfig, resolve_config_path};
use jig_core::output::format_command;
use jig_core::{print_error, print_info, print_success};
use owo_colors::OwoColorize;
use tracing::info;

use crate::clients::{create_jira_client_from_config, create_runtime, load_config};

/// Command for the config file
#[derive(Args)]
pub struct ConfigArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ConfigSubcommands,
}

/// Subcommands for the config command
#[derive(Subcommand)]
pub enum ConfigSubcommands {
  /// Write a new config file
  Init {
    /// Jira URL (e.g. https://example.atlassian.net)
    #[arg(long)]
    url: String,

    /// Jira user, usually an email address
    #[arg(long)]
    user: String,

    /// Jira API token
    #[arg(long)]
    token: String,

    /// Replace an existing config file
    #[arg(long, short = 'f')]
    force: bool,
  },

  /// Show the active settings with the token redacted
  Show,

  /// Check that the settings can reach Jira
  Check,
}

pub(super) fn handle_config_command(args: ConfigArgs, config: Option<&Path>) -> Result<()> {
  match args.subcommand {
    ConfigSubcommands::Init {
      url,
      user,
      token,
      force,
    } => {
      let path = resolve_config_path(config)?;
      if path.exists() && !force {
        anyhow::bail!(
          "Config file {} already exists; pass --force to replace it",
          path.display()
        );
      }

      let settings = JigConfig::new(&url, &user, &token)?;
      settings.save(&path)?;
      info!("Wrote config to {}", path.display());
      print_success(&format!("Saved config to {}", path.display()));
      print_info(&format!("Run {} to test the connection", format_command("jig config check")));
      Ok(())
    }
    ConfigSubcommands::Show => {
      let path = resolve_config_path(config)?;
      let settings = load_config(Some(&path))?;

      println!("  {:<6} {}", "File:".bold(), path.display());
      println!("  {:<6} {}", "URL:".bold(), settings.jira_url);
      println!("  {:<6} {}", "User:".bold(), settings.user);
      println!("  {:<6} {}", "Token:".bold(), settings.redacted_token());
      Ok(())
    }
    ConfigSubcommands::Check => {
      let settings = load_config(config)?;
      let rt = create_runtime()?;
      let client = create_jira_client_from_config(&settings)?;

      match rt.block_on(client.get_myself()) {
        Ok(me) => {
          print_success(&format!("Connected to {} as {}", settings.jira_url, me.display_name));
          Ok(())
        }
        Err(e) => {
          print_error(&format!("Could not connect to {}", settings.jira_url));
          Err(e).context("Check the URL, user and API token in the config file")
        }
      }
    }
  }
}
