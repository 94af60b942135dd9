//! # Jig Core Library
//!
//! Shared building blocks for the jig CLI: config file handling, terminal
//! output, fixed-width tables, issue key parsing, sprint dates and CSV import.

pub mod config;
pub mod consts;
pub mod dates;
pub mod import;
pub mod issue_key;
pub mod output;
pub mod table;
pub mod url;

// Re-export main types
pub use config::{ConfigDirs, ConfigError, JigConfig, get_config_dirs, resolve_config_path};
pub use issue_key::{IssueKey, IssueKeyError, expand_issue_keys, normalize_issue_key, normalize_project_key};
pub use output::{ColorMode, print_error, print_header, print_info, print_success, print_warning};
