//! Build script for jig
//!
//! Embeds the git revision and target triple so `jig --version` can report
//! exactly which build is running.

use std::env;
use std::process::Command;

fn main() {
  println!("cargo:rustc-env=GIT_HASH={}", git_hash());
  println!("cargo:rustc-env=TARGET={}", env::var("TARGET").unwrap_or_default());

  println!("cargo:rerun-if-changed=build.rs");
  println!("cargo:rerun-if-changed=.git/HEAD");
  println!("cargo:rerun-if-env-changed=TARGET");
}

/// Short hash of HEAD, or `unknown` outside a git checkout
fn git_hash() -> String {
  Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .and_then(|output| String::from_utf8(output.stdout).ok())
    .map(|hash| hash.trim().to_string())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "unknown".to_string())
}
