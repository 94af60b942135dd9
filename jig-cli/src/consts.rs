//! Constants for the jig command-line tool.

/// Application name used in messages and crash reports
pub const APP_NAME: &str = "jig";

/// Version string shown by `--version`
pub const VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("GIT_HASH"),
  " ",
  env!("TARGET"),
  ")"
);

/// Default number of issues fetched by listing commands
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Column widths for issue tables
pub const KEY_WIDTH: usize = 12;
pub const SUMMARY_WIDTH: usize = 50;
pub const STATUS_WIDTH: usize = 14;
pub const NAME_WIDTH: usize = 24;
pub const TYPE_WIDTH: usize = 10;
pub const COMMENT_WIDTH: usize = 60;
pub const DATE_WIDTH: usize = 10;
