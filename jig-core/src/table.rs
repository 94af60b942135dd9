//! # Fixed-Width Tables
//!
//! Terminal tables for listing issues, projects, boards and sprints. Cells are
//! squeezed into a fixed column width before `tabled` lays them out, so a
//! listing keeps the same shape no matter how long a summary is.

use tabled::settings::Style;
use tabled::{Table, Tabled};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `s` to at most `max_width` terminal columns, ending with `...`
/// when cut.
///
/// Cuts on character boundaries; wide (e.g. CJK) characters count as two
/// columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
  if s.width() <= max_width {
    return s.to_string();
  }
  if max_width <= 3 {
    return ".".repeat(max_width);
  }

  let budget = max_width - 3;
  let mut used = 0;
  let mut truncated = String::new();
  for c in s.chars() {
    let w = c.width().unwrap_or(0);
    if used + w > budget {
      break;
    }
    used += w;
    truncated.push(c);
  }
  format!("{truncated}...")
}

/// Fit a value into a cell exactly `width` columns wide.
///
/// Line breaks and tabs collapse to spaces, long values are truncated and
/// short ones padded on the right.
pub fn fit(s: &str, width: usize) -> String {
  let flattened: String = s
    .chars()
    .map(|c| if c.is_whitespace() { ' ' } else { c })
    .collect();
  let truncated = truncate_string(flattened.trim(), width);
  let padding = width.saturating_sub(truncated.width());
  format!("{truncated}{}", " ".repeat(padding))
}

/// Render rows as an ASCII table
pub fn render_table<I, T>(rows: I) -> String
where
  I: IntoIterator<Item = T>,
  T: Tabled,
{
  Table::new(rows).with(Style::ascii()).to_string()
}

/// Print rows as a table, or `empty_message` when there are none
pub fn print_table<T: Tabled>(rows: Vec<T>, empty_message: &str) {
  if rows.is_empty() {
    println!("  {empty_message}");
  } else {
    println!("{}", render_table(rows));
  }
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[derive(Tabled)]
  struct Row {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Summary")]
    summary: String,
  }

  #[test_case("short", 10, "short" ; "fits")]
  #[test_case("exactly10!", 10, "exactly10!" ; "exact")]
  #[test_case("a much longer summary", 10, "a much ..." ; "truncated")]
  #[test_case("abcdef", 2, ".." ; "tiny width")]
  #[test_case("日本語のテキストです", 9, "日本語..." ; "wide characters")]
  #[test_case("日本語のテキストです", 8, "日本..." ; "wide character not split")]
  fn test_truncate_string(input: &str, width: usize, expected: &str) {
    assert_eq!(truncate_string(input, width), expected);
  }

  #[test]
  fn test_fit_pads_and_flattens() {
    assert_eq!(fit("ab", 5), "ab   ");
    assert_eq!(fit("line one\nline two", 8), "line ...");
    assert_eq!(fit("  padded  ", 6), "padded");
  }

  #[test]
  fn test_fit_counts_display_columns() {
    let cell = fit("日本語のテキストです", 10);
    assert_eq!(cell.width(), 10);
    assert_eq!(cell, "日本語... ");
    assert_eq!(fit("日本", 6).width(), 6);
  }

  #[test]
  fn test_render_table_has_fixed_width() {
    let rows = vec![
      Row {
        key: fit("PROJ-1", 8),
        summary: fit("Short", 20),
      },
      Row {
        key: fit("PROJ-1234", 8),
        summary: fit("A summary that is far too long for the column", 20),
      },
    ];

    let rendered = render_table(rows);
    let widths: Vec<usize> = rendered.lines().map(|l| l.chars().count()).collect();

    assert!(rendered.contains("Summary"));
    assert!(rendered.contains("A summary that is..."));
    assert!(rendered.starts_with('+'));
    assert!(widths.windows(2).all(|w| w[0] == w[1]), "uneven table:\n{rendered}");
  }
}
