//! Throwaway jig config files for tests
//!
//! Writes a `config.json` into a temporary directory. The guard owns the
//! directory, so the file disappears when the guard is dropped.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::TempDir;

/// A jig config file living in its own temporary directory
pub struct ConfigFileGuard {
  temp_dir: TempDir,
  path: PathBuf,
}

impl ConfigFileGuard {
  /// Write a config pointing at `jira_url` with fixed test credentials
  pub fn new(jira_url: &str) -> anyhow::Result<Self> {
    let body = serde_json::json!({
      "jira_url": jira_url,
      "user": "test_user",
      "api_token": "test_token",
    });
    Self::with_contents(&serde_json::to_string_pretty(&body)?)
  }

  /// Write arbitrary contents, useful for malformed-config tests
  pub fn with_contents(contents: &str) -> anyhow::Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create temporary directory")?;
    let path = temp_dir.path().join("config.json");
    fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(Self { temp_dir, path })
  }

  /// Path of the config file
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Directory containing the config file
  pub fn dir(&self) -> &Path {
    self.temp_dir.path()
  }
}
