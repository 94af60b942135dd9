//! # Jig CLI Entry Point
//!
//! Parses arguments, sets up tracing and the crash handler, runs the command
//! and turns any error into a message and exit status 1.

use clap::Parser;
use jig_cli::cli::{Cli, describe_failure, handle_cli};
use jig_cli::panic;
use jig_core::{get_config_dirs, print_error};
use tracing::{debug, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() {
  let crash_dir = get_config_dirs().map(|dirs| dirs.data_dir().join("crashes"));
  let crash_handler = crash_dir.and_then(panic::install);

  // Parse CLI arguments using the derive-based implementation
  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  // Logs go to stderr so tables on stdout stay clean
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);
  if let Err(e) = crash_handler {
    warn!("Crash handler not installed: {e:#}");
  }

  if let Err(err) = handle_cli(cmd) {
    print_error(&format!("{err:#}"));
    warn!("{}", describe_failure(&err));
    debug!("{err:?}");
    std::process::exit(1);
  }
}
