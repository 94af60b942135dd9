//! # Output Formatting
//!
//! Provides formatted output functions with colors, emojis, and consistent
//! styling for user-facing messages and terminal output.

use owo_colors::OwoColorize;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the global owo-colors override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Let owo-colors detect the terminal
      ColorMode::Auto => {}
    }
  }
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", check.green().bold(), message);
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", cross.red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", warning.yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", info.blue().bold(), message);
}

/// Print a section header
pub fn print_header(header: &str) {
  println!("\n{}", header.blue().bold());
}

/// Format an issue or project key
pub fn format_key(key: &str) -> String {
  key.bright_blue().bold().to_string()
}

/// Format a URL
pub fn format_url(url: &str) -> String {
  url.underline().to_string()
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.purple().to_string()
}

/// Format a workflow status by its usual category
pub fn format_status(status: &str) -> String {
  match status.to_ascii_lowercase().as_str() {
    "done" | "closed" | "resolved" => status.green().to_string(),
    "in progress" | "in review" | "active" => status.yellow().to_string(),
    "blocked" => status.red().to_string(),
    "to do" | "open" | "backlog" | "future" => status.blue().to_string(),
    _ => status.to_string(),
  }
}

/// Format a sprint state (`future`, `active` or `closed`)
pub fn format_sprint_state(state: &str) -> String {
  match state {
    "active" => state.green().to_string(),
    "future" => state.blue().to_string(),
    "closed" => state.bright_black().to_string(),
    _ => state.to_string(),
  }
}
