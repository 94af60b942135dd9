//! # Client Creation
//!
//! Loads the config file and builds an authenticated Jira client together
//! with the runtime that drives it.

use std::path::Path;

use anyhow::{Context, Result};
use jig_core::config::{JigConfig, resolve_config_path};
use jig_jira::{JiraClient, create_jira_client};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Load the config, honouring `--config`, `$JIG_CONFIG` and the environment
/// overrides
pub fn load_config(explicit: Option<&Path>) -> Result<JigConfig> {
  let path = resolve_config_path(explicit)?;
  debug!("Using config file {}", path.display());
  JigConfig::load(&path).context("Run 'jig config init' to create a config file")
}

/// Build a Jira client from loaded settings
pub fn create_jira_client_from_config(config: &JigConfig) -> Result<JiraClient> {
  create_jira_client(&config.jira_url, &config.user, &config.api_token).context("Failed to create Jira client")
}

/// Calls are issued one at a time, so a single-threaded runtime is enough
pub fn create_runtime() -> Result<Runtime> {
  Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}

/// Creates a tokio runtime and an authenticated Jira client
///
/// This is a convenience function for CLI commands that need both.
pub fn create_jira_runtime_and_client(config_path: Option<&Path>) -> Result<(Runtime, JiraClient)> {
  let config = load_config(config_path)?;
  let rt = create_runtime()?;
  let client = create_jira_client_from_config(&config)?;
  Ok((rt, client))
}

#[cfg(test)]
mod tests {
  use jig_test_utils::ConfigFileGuard;

  use super::*;

  #[test]
  fn test_client_from_config_file() {
    let guard = ConfigFileGuard::new("https://test.atlassian.net/").unwrap();
    let (_rt, client) = create_jira_runtime_and_client(Some(guard.path())).unwrap();
    assert_eq!(client.base_url(), "https://test.atlassian.net");
  }

  #[test]
  fn test_missing_config_points_at_init() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(Some(&dir.path().join("missing.json"))).unwrap_err();
    assert!(format!("{err:#}").contains("jig config init"));
  }
}
