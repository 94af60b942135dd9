//! # CSV Import
//!
//! Reads story rows from a CSV file and replays them against an
//! [`ImportTarget`]. Rows without a summary are skipped. The assignee is only
//! touched for rows whose issue was actually created.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Issue type used when a row leaves `issue_type` blank
pub const DEFAULT_ISSUE_TYPE: &str = "Story";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRow {
  summary: Option<String>,
  description: Option<String>,
  #[serde(alias = "issuetype", alias = "type")]
  issue_type: Option<String>,
  assignee: Option<String>,
  epic: Option<String>,
  labels: Option<String>,
}

/// A validated row ready to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
  /// 1-based data row number (the header is not counted)
  pub row: usize,
  pub summary: String,
  pub description: Option<String>,
  pub issue_type: String,
  pub assignee: Option<String>,
  pub epic: Option<String>,
  pub labels: Vec<String>,
}

/// A row that was left out, with the reason why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
  pub row: usize,
  pub reason: String,
}

/// Result of reading an import file
#[derive(Debug, Default)]
pub struct ParsedImport {
  pub rows: Vec<ImportRow>,
  pub skipped: Vec<SkippedRow>,
}

fn non_blank(value: Option<String>) -> Option<String> {
  value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl RawRow {
  fn into_row(self, row: usize) -> Result<ImportRow, SkippedRow> {
    let Some(summary) = non_blank(self.summary) else {
      return Err(SkippedRow {
        row,
        reason: "missing summary".to_string(),
      });
    };

    let labels = non_blank(self.labels)
      .map(|labels| {
        labels
          .split(';')
          .map(str::trim)
          .filter(|l| !l.is_empty())
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default();

    Ok(ImportRow {
      row,
      summary,
      description: non_blank(self.description),
      issue_type: non_blank(self.issue_type).unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string()),
      assignee: non_blank(self.assignee),
      epic: non_blank(self.epic),
      labels,
    })
  }
}

/// Parse CSV data with a header row.
///
/// Header names are matched case-insensitively; spaces become underscores so
/// `Issue Type` maps to `issue_type`.
pub fn parse_import<R: Read>(reader: R) -> Result<ParsedImport> {
  let mut csv_reader = ReaderBuilder::new().flexible(true).trim(Trim::All).from_reader(reader);

  let headers: StringRecord = csv_reader
    .headers()
    .context("Failed to read CSV header row")?
    .iter()
    .map(|h| h.trim().to_lowercase().replace(' ', "_"))
    .collect();
  if !headers.iter().any(|h| h == "summary") {
    anyhow::bail!("CSV header has no 'summary' column");
  }
  csv_reader.set_headers(headers);

  let mut parsed = ParsedImport::default();
  for (index, record) in csv_reader.deserialize::<RawRow>().enumerate() {
    let row = index + 1;
    let outcome = match record {
      Ok(raw) => raw.into_row(row),
      Err(e) => Err(SkippedRow {
        row,
        reason: format!("unreadable row: {e}"),
      }),
    };

    match outcome {
      Ok(import_row) => parsed.rows.push(import_row),
      Err(skipped) => {
        warn!("Skipping CSV row {}: {}", skipped.row, skipped.reason);
        parsed.skipped.push(skipped);
      }
    }
  }

  debug!(
    "Parsed {} importable rows, {} skipped",
    parsed.rows.len(),
    parsed.skipped.len()
  );
  Ok(parsed)
}

/// Parse an import file from disk
pub fn read_import_file(path: &Path) -> Result<ParsedImport> {
  let file = File::open(path).with_context(|| format!("Failed to open CSV file {}", path.display()))?;
  parse_import(file).with_context(|| format!("Failed to import {}", path.display()))
}

/// Where imported rows end up
pub trait ImportTarget {
  /// Create an issue for `row` in `project`, returning the new key
  fn create_issue(&mut self, project: &str, row: &ImportRow) -> Result<String>;

  /// Assign an already created issue
  fn assign_issue(&mut self, issue_key: &str, assignee: &str) -> Result<()>;
}

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportReport {
  /// Row number and key of every created issue
  pub created: Vec<(usize, String)>,
  pub skipped: Vec<SkippedRow>,
  /// Row number and error for rows whose creation failed
  pub failed: Vec<(usize, String)>,
  /// Key and error for created issues whose assignee could not be set
  pub assign_failed: Vec<(String, String)>,
}

impl ImportReport {
  /// True when every importable row was created and assigned
  pub fn is_clean(&self) -> bool {
    self.failed.is_empty() && self.assign_failed.is_empty()
  }
}

/// Create every parsed row in `project`.
///
/// One failing row doesn't stop the rest.
pub fn run_import<T: ImportTarget>(target: &mut T, project: &str, parsed: &ParsedImport) -> ImportReport {
  let mut report = ImportReport {
    skipped: parsed.skipped.clone(),
    ..Default::default()
  };

  for row in &parsed.rows {
    let key = match target.create_issue(project, row) {
      Ok(key) => key,
      Err(e) => {
        warn!("Row {} could not be created: {e:#}", row.row);
        report.failed.push((row.row, format!("{e:#}")));
        continue;
      }
    };
    info!("Row {} created as {key}", row.row);

    if let Some(assignee) = &row.assignee
      && let Err(e) = target.assign_issue(&key, assignee)
    {
      warn!("Could not assign {key} to {assignee}: {e:#}");
      report.assign_failed.push((key.clone(), format!("{e:#}")));
    }

    report.created.push((row.row, key));
  }

  report
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Default)]
  struct RecordingTarget {
    next_id: u32,
    fail_summaries: Vec<&'static str>,
    fail_assign: bool,
    created: Vec<String>,
    assigned: Vec<(String, String)>,
  }

  impl ImportTarget for RecordingTarget {
    fn create_issue(&mut self, project: &str, row: &ImportRow) -> Result<String> {
      if self.fail_summaries.iter().any(|s| *s == row.summary) {
        anyhow::bail!("Jira rejected the issue");
      }
      self.next_id += 1;
      let key = format!("{project}-{}", self.next_id);
      self.created.push(key.clone());
      Ok(key)
    }

    fn assign_issue(&mut self, issue_key: &str, assignee: &str) -> Result<()> {
      self.assigned.push((issue_key.to_string(), assignee.to_string()));
      if self.fail_assign {
        anyhow::bail!("no such user");
      }
      Ok(())
    }
  }

  const CSV: &str = "\
Summary,Description,Issue Type,Assignee,Labels
Login page,Build the login page,Story,alice@example.com,frontend;auth
,Row without a summary,Task,bob@example.com,
   ,Whitespace summary,,,
Fix crash,,Bug,,
Write docs,Document the API,,carol@example.com,
";

  #[test]
  fn test_parse_import_rows_and_skips() {
    let parsed = parse_import(CSV.as_bytes()).unwrap();

    assert_eq!(parsed.rows.len(), 3);
    assert_eq!(
      parsed.skipped.iter().map(|s| s.row).collect::<Vec<_>>(),
      vec![2, 3]
    );
    assert!(parsed.skipped.iter().all(|s| s.reason == "missing summary"));

    let first = &parsed.rows[0];
    assert_eq!(first.row, 1);
    assert_eq!(first.summary, "Login page");
    assert_eq!(first.description.as_deref(), Some("Build the login page"));
    assert_eq!(first.issue_type, "Story");
    assert_eq!(first.assignee.as_deref(), Some("alice@example.com"));
    assert_eq!(first.labels, vec!["frontend", "auth"]);

    let crash = &parsed.rows[1];
    assert_eq!(crash.row, 4);
    assert_eq!(crash.issue_type, "Bug");
    assert_eq!(crash.description, None);
    assert_eq!(crash.assignee, None);
    assert!(crash.labels.is_empty());

    assert_eq!(parsed.rows[2].issue_type, DEFAULT_ISSUE_TYPE);
  }

  #[test]
  fn test_parse_import_requires_summary_column() {
    let err = parse_import("title,description\nA,B\n".as_bytes()).unwrap_err();
    assert!(err.to_string().contains("summary"));
  }

  #[test]
  fn test_parse_import_short_rows() {
    let parsed = parse_import("summary,description,assignee\nOnly a summary\n".as_bytes()).unwrap();
    assert_eq!(parsed.rows.len(), 1);
    assert_eq!(parsed.rows[0].assignee, None);
  }

  #[test]
  fn test_run_import_assigns_only_created_issues() {
    let parsed = parse_import(CSV.as_bytes()).unwrap();
    let mut target = RecordingTarget {
      fail_summaries: vec!["Login page"],
      ..Default::default()
    };

    let report = run_import(&mut target, "PROJ", &parsed);

    // "Login page" failed, so alice is never assigned
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 1);
    assert_eq!(report.created, vec![(4, "PROJ-1".to_string()), (5, "PROJ-2".to_string())]);
    assert_eq!(
      target.assigned,
      vec![("PROJ-2".to_string(), "carol@example.com".to_string())]
    );
    assert_eq!(report.skipped.len(), 2);
    assert!(!report.is_clean());
  }

  #[test]
  fn test_run_import_records_assign_failures() {
    let parsed = parse_import(CSV.as_bytes()).unwrap();
    let mut target = RecordingTarget {
      fail_assign: true,
      ..Default::default()
    };

    let report = run_import(&mut target, "PROJ", &parsed);

    assert_eq!(report.created.len(), 3);
    assert_eq!(report.assign_failed.len(), 2);
    assert_eq!(report.assign_failed[0].0, "PROJ-1");
    assert!(report.failed.is_empty());
  }

  #[test]
  fn test_run_import_clean() {
    let parsed = parse_import("summary\nOne\nTwo\n".as_bytes()).unwrap();
    let mut target = RecordingTarget::default();

    let report = run_import(&mut target, "PROJ", &parsed);

    assert!(report.is_clean());
    assert_eq!(target.created, vec!["PROJ-1", "PROJ-2"]);
    assert!(target.assigned.is_empty());
  }
}
