//! # Issue Keys
//!
//! Parsing of Jira issue keys (`PROJ-123`) and key ranges
//! (`PROJ-10..PROJ-20`) given on the command line.

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::consts::MAX_RANGE_LEN;

static ISSUE_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9_]+)-(\d+)$").expect("Failed to compile issue key regex"));

static PROJECT_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9]{1,9}$").expect("Failed to compile project key regex"));

/// Errors that can occur while parsing keys and ranges
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IssueKeyError {
  #[error("Invalid issue key: '{0}' (expected something like PROJ-123)")]
  InvalidKey(String),
  #[error("Invalid project key: '{0}' (expected 2-10 letters or digits, starting with a letter)")]
  InvalidProjectKey(String),
  #[error("Range '{0}' spans two projects")]
  ProjectMismatch(String),
  #[error("Range '{0}' ends before it starts")]
  ReversedRange(String),
  #[error("Range '{range}' expands to {len} keys, more than the limit of {max}")]
  RangeTooLarge { range: String, len: u64, max: u64 },
}

/// A parsed issue key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey {
  pub project: String,
  pub number: u64,
}

impl IssueKey {
  /// Parse a key, upper-casing the project part
  pub fn parse(input: &str) -> Result<Self, IssueKeyError> {
    let input = input.trim();
    let invalid = || IssueKeyError::InvalidKey(input.to_string());

    let captures = ISSUE_KEY_PATTERN.captures(input).ok_or_else(invalid)?;
    let project = captures.get(1).ok_or_else(invalid)?.as_str().to_uppercase();
    let number = captures
      .get(2)
      .ok_or_else(invalid)?
      .as_str()
      .parse::<u64>()
      .map_err(|_| invalid())?;

    Ok(Self { project, number })
  }
}

impl fmt::Display for IssueKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}-{}", self.project, self.number)
  }
}

/// Normalize a single issue key
pub fn normalize_issue_key(input: &str) -> Result<String, IssueKeyError> {
  IssueKey::parse(input).map(|key| key.to_string())
}

/// Validate and upper-case a project key
pub fn normalize_project_key(input: &str) -> Result<String, IssueKeyError> {
  let key = input.trim().to_uppercase();
  if PROJECT_KEY_PATTERN.is_match(&key) {
    Ok(key)
  } else {
    Err(IssueKeyError::InvalidProjectKey(input.trim().to_string()))
  }
}

/// Expand `FROM..TO` into every key between them, inclusive.
///
/// A plain key expands to itself.
pub fn parse_key_range(input: &str) -> Result<Vec<String>, IssueKeyError> {
  let input = input.trim();
  let Some((start, end)) = input.split_once("..") else {
    return Ok(vec![normalize_issue_key(input)?]);
  };

  let start = IssueKey::parse(start)?;
  let end = IssueKey::parse(end)?;

  if start.project != end.project {
    return Err(IssueKeyError::ProjectMismatch(input.to_string()));
  }
  if start.number > end.number {
    return Err(IssueKeyError::ReversedRange(input.to_string()));
  }

  // `span + 1` overflows for `KEY-0..KEY-<u64::MAX>`
  let span = end.number - start.number;
  if span >= MAX_RANGE_LEN {
    return Err(IssueKeyError::RangeTooLarge {
      range: input.to_string(),
      len: span.saturating_add(1),
      max: MAX_RANGE_LEN,
    });
  }

  Ok(
    (start.number..=end.number)
      .map(|number| format!("{}-{number}", start.project))
      .collect(),
  )
}

/// Expand command line arguments into a list of keys.
///
/// Each argument may be a key, a range, or a comma separated mix of both.
/// Order follows the input and repeated keys are dropped.
pub fn expand_issue_keys<S: AsRef<str>>(args: &[S]) -> Result<Vec<String>, IssueKeyError> {
  let mut seen = HashSet::new();
  let mut keys = Vec::new();

  for part in args
    .iter()
    .flat_map(|arg| arg.as_ref().split(','))
    .map(str::trim)
    .filter(|part| !part.is_empty())
  {
    for key in parse_key_range(part)? {
      if seen.insert(key.clone()) {
        keys.push(key);
      }
    }
  }

  Ok(keys)
}
