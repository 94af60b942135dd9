//! # Project Command
//!
//! Create, list, show, update and delete Jira projects.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use jig_core::output::format_key;
use jig_core::table::print_table;
use jig_core::{normalize_project_key, print_header, print_info, print_success};
use jig_jira::{NewProject, ProjectUpdate};
use owo_colors::OwoColorize;

use crate::clients::create_jira_runtime_and_client;
use crate::prompt::confirm_action;
use crate::tables::ProjectRow;
use crate::users::{UserSpec, require_account_id};

/// Command for projects
#[derive(Args)]
pub struct ProjectArgs {
  /// The subcommand to execute
  #[command(subcommand)]
  pub subcommand: ProjectSubcommands,
}

/// Jira project templates
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
  Software,
  Business,
  ServiceDesk,
}

impl ProjectType {
  /// Key the REST API expects
  pub const fn as_key(self) -> &'static str {
    match self {
      Self::Software => "software",
      Self::Business => "business",
      Self::ServiceDesk => "service_desk",
    }
  }
}

/// Subcommands for the project command
#[derive(Subcommand)]
pub enum ProjectSubcommands {
  /// Create a project
  Create {
    /// Project key: 2-10 letters or digits, starting with a letter
    #[arg(long, short = 'k')]
    key: String,

    /// Project name
    #[arg(long, short = 'n')]
    name: String,

    /// Project description
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// Project lead: email, name or 'me'
    #[arg(long, default_value = "me")]
    lead: UserSpec,

    /// Project type
    #[arg(long = "type", value_enum, default_value_t = ProjectType::Software)]
    project_type: ProjectType,
  },

  /// List projects
  #[command(alias = "ls")]
  List,

  /// Show a project
  Show {
    /// Project key (e.g. PROJ)
    key: String,
  },

  /// Change a project's name, description or lead
  Update {
    /// Project key (e.g. PROJ)
    key: String,

    /// New name
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// New description
    #[arg(long, short = 'd')]
    description: Option<String>,

    /// New lead: email, name or 'me'
    #[arg(long)]
    lead: Option<UserSpec>,
  },

  /// Delete a project
  #[command(alias = "rm")]
  Delete {
    /// Project key (e.g. PROJ)
    key: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    yes: bool,
  },
}

pub(super) fn handle_project_command(project: ProjectArgs, config: Option<&Path>) -> Result<()> {
  match project.subcommand {
    ProjectSubcommands::Create {
      key,
      name,
      description,
      lead,
      project_type,
    } => {
      let key = normalize_project_key(&key)?;
      if name.trim().is_empty() {
        anyhow::bail!("The project name must not be empty");
      }

      let (rt, client) = create_jira_runtime_and_client(config)?;
      let lead_account_id = rt.block_on(require_account_id(&client, &lead))?;
      let new_project = NewProject {
        key,
        name: name.trim().to_string(),
        project_type_key: project_type.as_key().to_string(),
        lead_account_id,
        description,
      };

      let created = rt.block_on(client.create_project(&new_project))?;
      print_success(&format!("Created project {} ({})", format_key(&created.key), new_project.name));
      Ok(())
    }
    ProjectSubcommands::List => {
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let projects = rt.block_on(client.list_projects())?;
      print_table(projects.iter().map(ProjectRow::from).collect(), "No projects found");
      Ok(())
    }
    ProjectSubcommands::Show { key } => {
      let key = normalize_project_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let project = rt.block_on(client.get_project(&key))?;

      print_header(&format!("{} {}", format_key(&project.key), project.name));
      println!("  {:<8} {}", "ID:".bold(), project.id);
      println!(
        "  {:<8} {}",
        "Type:".bold(),
        project.project_type_key.as_deref().unwrap_or("-")
      );
      println!(
        "  {:<8} {}",
        "Lead:".bold(),
        project.lead.as_ref().map_or("-", |u| u.display_name.as_str())
      );
      if let Some(description) = project.description.as_deref().filter(|d| !d.trim().is_empty()) {
        print_header("Description");
        println!("{description}");
      }
      Ok(())
    }
    ProjectSubcommands::Update {
      key,
      name,
      description,
      lead,
    } => {
      let key = normalize_project_key(&key)?;
      let (rt, client) = create_jira_runtime_and_client(config)?;
      let lead_account_id = match &lead {
        Some(spec) => Some(rt.block_on(require_account_id(&client, spec))?),
        None => None,
      };

      let update = ProjectUpdate {
        name,
        description,
        lead_account_id,
      };
      if update.is_empty() {
        anyhow::bail!("Nothing to update; pass --name, --description or --lead");
      }

      rt.block_on(client.update_project(&key, &update))?;
      print_success(&format!("Updated project {}", format_key(&key)));
      Ok(())
    }
    ProjectSubcommands::Delete { key, yes } => {
      let key = normalize_project_key(&key)?;
      if !confirm_action(&format!("Delete project {key} and all of its issues?"), yes)? {
        print_info("Nothing deleted");
        return Ok(());
      }

      let (rt, client) = create_jira_runtime_and_client(config)?;
      rt.block_on(client.delete_project(&key))?;
      print_success(&format!("Deleted project {}", format_key(&key)));
      Ok(())
    }
  }
}
