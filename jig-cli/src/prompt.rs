//! Confirmation prompts for destructive commands.

use anyhow::{Context, Result};
use dialoguer::Confirm;
use dialoguer::theme::ColorfulTheme;
use is_terminal::IsTerminal;

/// Ask before doing something that cannot be undone.
///
/// `assume_yes` (the `--yes` flag) skips the prompt. Without a terminal there
/// is nobody to ask, so the command is refused instead of hanging.
pub fn confirm_action(prompt: &str, assume_yes: bool) -> Result<bool> {
  if assume_yes {
    return Ok(true);
  }

  if !std::io::stdin().is_terminal() {
    anyhow::bail!("Refusing to continue without confirmation; pass --yes to skip the prompt");
  }

  Confirm::with_theme(&ColorfulTheme::default())
    .with_prompt(prompt)
    .default(false)
    .interact()
    .context("Failed to read confirmation")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_assume_yes_skips_prompt() {
    assert!(confirm_action("Delete everything?", true).unwrap());
  }
}
