//! Sprint date handling.
//!
//! Dates are entered as `YYYY-MM-DD` and sent to the agile API as
//! midnight-UTC timestamps.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
    .with_context(|| format!("Invalid date '{input}', expected YYYY-MM-DD"))
}

/// Render a date as the ISO-8601 timestamp the agile API expects
pub fn to_jira_timestamp(date: NaiveDate) -> String {
  date.and_hms_opt(0, 0, 0).map_or_else(
    || format!("{date}T00:00:00.000Z"),
    |dt| dt.and_utc().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
  )
}

/// Reject an end date that falls before the start date
pub fn validate_date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<()> {
  if let (Some(start), Some(end)) = (start, end)
    && end < start
  {
    anyhow::bail!("End date {end} is before start date {start}");
  }
  Ok(())
}

/// Show only the date part of a timestamp returned by Jira
pub fn display_date(timestamp: &str) -> String {
  DateTime::parse_from_rfc3339(timestamp)
    .map(|dt| dt.with_timezone(&Utc).date_naive().to_string())
    .unwrap_or_else(|_| timestamp.split('T').next().unwrap_or(timestamp).to_string())
}
