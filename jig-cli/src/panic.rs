//! # Crash Handling
//!
//! Replaces the default panic output with a short, readable message and saves
//! a crash report (location, message, backtrace) under the data directory.
//! Only installed in release builds; debug builds keep the standard output.

use std::fs::{self, File};
use std::io::Write;
use std::panic::{self, PanicHookInfo};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use backtrace::Backtrace;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::consts::{APP_NAME, VERSION};

/// Panic messages longer than this are cut in the terminal output
const MAX_MESSAGE_LEN: usize = 500;

/// Install the crash handler, writing reports into `report_dir`
pub fn install(report_dir: PathBuf) -> Result<()> {
  if cfg!(debug_assertions) {
    return Ok(());
  }

  fs::create_dir_all(&report_dir)
    .with_context(|| format!("Failed to create crash report directory {}", report_dir.display()))?;

  panic::set_hook(Box::new(move |info| {
    let backtrace = Backtrace::new();
    let report = write_report(&report_dir, info, &backtrace).ok();
    print_crash_message(info, report.as_deref());
  }));

  Ok(())
}

fn panic_message(info: &PanicHookInfo) -> Option<String> {
  info
    .payload()
    .downcast_ref::<&str>()
    .map(|s| (*s).to_string())
    .or_else(|| info.payload().downcast_ref::<String>().cloned())
}

fn print_crash_message(info: &PanicHookInfo, report: Option<&Path>) {
  let colors = std::io::stderr().is_terminal();
  let paint = |text: &str, style: fn(&str) -> String| if colors { style(text) } else { text.to_string() };

  eprintln!(
    "{} {}",
    paint(APP_NAME, |s: &str| s.bright_blue().bold().to_string()),
    paint("hit an internal error and had to stop.", |s: &str| s.red().to_string())
  );

  if let Some(location) = info.location() {
    eprintln!("\n📍 Location: {}:{}", location.file(), location.line());
  }

  if let Some(message) = panic_message(info) {
    let shown: String = message.chars().take(MAX_MESSAGE_LEN).collect();
    let suffix = if shown.len() < message.len() { "... (truncated)" } else { "" };
    eprintln!("💬 Message: {shown}{suffix}");
  }

  if let Some(path) = report {
    eprintln!(
      "\n📋 Crash report saved: {}",
      paint(&path.display().to_string(), |s: &str| s.yellow().underline().to_string())
    );
    eprintln!("   Please attach it when reporting the problem.");
  }
}

fn write_report(dir: &Path, info: &PanicHookInfo, backtrace: &Backtrace) -> std::io::Result<PathBuf> {
  let now = chrono::Utc::now();
  let path = dir.join(format!("crash_report_{}.txt", now.format("%Y%m%d_%H%M%S")));
  let mut file = File::create(&path)?;

  writeln!(file, "{APP_NAME} crash report")?;
  writeln!(file, "version: {VERSION}")?;
  writeln!(file, "os: {} ({})", std::env::consts::OS, std::env::consts::ARCH)?;
  writeln!(file, "time: {}", now.to_rfc3339())?;
  if let Some(location) = info.location() {
    writeln!(
      file,
      "location: {}:{}:{}",
      location.file(),
      location.line(),
      location.column()
    )?;
  }
  if let Some(message) = panic_message(info) {
    writeln!(file, "message: {message}")?;
  }
  writeln!(file, "\nbacktrace:\n{backtrace:?}")?;

  Ok(path)
}
