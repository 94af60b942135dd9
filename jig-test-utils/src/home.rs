//! HOME directory management for testing
//!
//! Isolates the HOME directory so config discovery never reads the real
//! user's `~/.config/jig`.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::env::EnvVarGuard;

/// A test environment that overrides the HOME directory to use a temporary
/// directory
pub struct HomeEnvTestGuard {
  /// The temporary directory that will be used as HOME
  pub temp_dir: TempDir,
  _home: EnvVarGuard,
}

impl Default for HomeEnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl HomeEnvTestGuard {
  /// Create a new test environment with a temporary HOME directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let home = EnvVarGuard::new("HOME");
    home.set(temp_dir.path());

    Self { temp_dir, _home: home }
  }

  /// Get the path to the temporary HOME directory
  pub fn home_dir(&self) -> &Path {
    self.temp_dir.path()
  }

  /// Get the path to a file in the temporary HOME directory
  pub fn home_path(&self, relative_path: &str) -> PathBuf {
    self.temp_dir.path().join(relative_path)
  }
}
