//! # Configuration Management
//!
//! Loads the JSON config file holding the Jira URL and credentials, resolves
//! where that file lives, and applies environment variable overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_FILE_NAME, ENV_JIG_CONFIG, ENV_JIRA_API_TOKEN, ENV_JIRA_URL, ENV_JIRA_USER};
use crate::url::normalize_jira_url;

/// Errors raised while validating a loaded config
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("Config file not found: {0}. Run 'jig config init' to create one.")]
  NotFound(PathBuf),
  #[error("Config field '{0}' is missing or empty")]
  EmptyField(&'static str),
}

/// Represents the configuration directories for the jig application
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl ConfigDirs {
  /// Create a new ConfigDirs instance
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("dev", "jig", "jig").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
      data_dir: proj_dirs.data_dir().to_path_buf(),
    })
  }

  /// Get the config directory
  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Get the data directory
  pub fn data_dir(&self) -> &Path {
    &self.data_dir
  }

  /// Get the path to the default config file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join(CONFIG_FILE_NAME)
  }
}

/// Get the configuration directories
pub fn get_config_dirs() -> Result<ConfigDirs> {
  ConfigDirs::new()
}

/// Decide which config file to use.
///
/// An explicit path (the `--config` flag) wins, then `$JIG_CONFIG`, then the
/// default location in the user's config directory.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
  if let Some(path) = explicit {
    return Ok(path.to_path_buf());
  }

  if let Ok(path) = std::env::var(ENV_JIG_CONFIG)
    && !path.trim().is_empty()
  {
    return Ok(PathBuf::from(path));
  }

  Ok(get_config_dirs()?.config_path())
}

/// Connection settings for a Jira instance
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JigConfig {
  #[serde(default)]
  pub jira_url: String,
  #[serde(default)]
  pub user: String,
  #[serde(default)]
  pub api_token: String,
}

impl std::fmt::Debug for JigConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("JigConfig")
      .field("jira_url", &self.jira_url)
      .field("user", &self.user)
      .field("api_token", &self.redacted_token())
      .finish()
  }
}

impl JigConfig {
  /// Build a config from explicit values, normalizing the URL
  pub fn new(jira_url: &str, user: &str, api_token: &str) -> Result<Self> {
    let config = Self {
      jira_url: normalize_jira_url(jira_url)?,
      user: user.trim().to_string(),
      api_token: api_token.trim().to_string(),
    };
    config.validate()?;
    Ok(config)
  }

  /// Load the config file at `path`, apply environment overrides and validate
  pub fn load(path: &Path) -> Result<Self> {
    let mut config = Self::read(path)?;
    config.apply_overrides(|name| std::env::var(name).ok());
    config.finish()
  }

  /// Load without consulting the environment
  pub fn load_without_env(path: &Path) -> Result<Self> {
    Self::read(path)?.finish()
  }

  fn read(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }

    debug!("Reading config from {}", path.display());
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
  }

  fn finish(mut self) -> Result<Self> {
    self.validate()?;
    self.jira_url = normalize_jira_url(&self.jira_url)?;
    Ok(self)
  }

  /// Replace fields with non-empty values returned by `lookup`.
  ///
  /// `lookup` receives the environment variable name for each field.
  pub fn apply_overrides<F>(&mut self, lookup: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    let fields = [
      (ENV_JIRA_URL, &mut self.jira_url),
      (ENV_JIRA_USER, &mut self.user),
      (ENV_JIRA_API_TOKEN, &mut self.api_token),
    ];

    for (name, field) in fields {
      if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
        debug!("Overriding config value from ${name}");
        *field = value.trim().to_string();
      }
    }
  }

  /// Check that every field is present
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.jira_url.trim().is_empty() {
      return Err(ConfigError::EmptyField("jira_url"));
    }
    if self.user.trim().is_empty() {
      return Err(ConfigError::EmptyField("user"));
    }
    if self.api_token.trim().is_empty() {
      return Err(ConfigError::EmptyField("api_token"));
    }
    Ok(())
  }

  /// Save the config as pretty JSON, creating the parent directory
  pub fn save(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .with_context(|| format!("Failed to restrict permissions on {}", path.display()))?;
    }

    Ok(())
  }

  /// The API token with everything but the last four characters masked
  pub fn redacted_token(&self) -> String {
    let chars: Vec<char> = self.api_token.chars().collect();
    if chars.len() <= 4 {
      return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - 4))
  }
}
