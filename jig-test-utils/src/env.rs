//! Environment variable management for testing
//!
//! Tests that touch process-wide environment variables restore the previous
//! values on drop so they don't leak into other tests in the same binary.

use std::env;
use std::path::PathBuf;

use tempfile::TempDir;

/// Scoped override for a single environment variable.
///
/// The variable starts out untouched; call [`EnvVarGuard::set`] or
/// [`EnvVarGuard::remove`] to change it. The original value is restored when
/// the guard is dropped.
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Capture the current value of `name`
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  /// Set the variable for the lifetime of the guard
  pub fn set(&self, value: impl AsRef<std::ffi::OsStr>) {
    // SAFETY: test-only; callers serialize access to the variable they own.
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  /// Remove the variable for the lifetime of the guard
  pub fn remove(&self) {
    // SAFETY: test-only; callers serialize access to the variable they own.
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    // SAFETY: restores the value captured in `new`.
    unsafe {
      match &self.original {
        Some(val) => env::set_var(&self.name, val),
        None => env::remove_var(&self.name),
      }
    }
  }
}

/// A test environment that points the XDG base directories at a per-test
/// temporary directory
pub struct EnvTestGuard {
  /// The temporary directory backing the XDG directories
  pub temp_dir: TempDir,
  vars: Vec<EnvVarGuard>,
}

impl Default for EnvTestGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl EnvTestGuard {
  /// XDG environment variable names
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";
  pub const XDG_DATA_HOME: &'static str = "XDG_DATA_HOME";

  /// Create a new test environment with overridden XDG directories
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let mut vars = Vec::new();

    for (name, subdir) in [(Self::XDG_CONFIG_HOME, "config"), (Self::XDG_DATA_HOME, "data")] {
      let dir = temp_dir.path().join(subdir);
      std::fs::create_dir_all(&dir).expect("Failed to create XDG directory");

      let guard = EnvVarGuard::new(name);
      guard.set(&dir);
      vars.push(guard);
    }

    Self { temp_dir, vars }
  }

  /// Get the path to the XDG config directory
  pub fn config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("config")
  }

  /// Get the path to the XDG data directory
  pub fn data_dir(&self) -> PathBuf {
    self.temp_dir.path().join("data")
  }
}
