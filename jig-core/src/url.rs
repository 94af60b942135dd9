//! URL helpers for the Jira base URL.
//!
//! The configured `jira_url` is user input, so it may lack a scheme or carry a
//! trailing slash. Everything downstream builds endpoint URLs with
//! `format!("{base}/rest/...")`, so the base must be normalized once here.

use anyhow::Result;
use url::{Position, Url};

/// Render a parsed URL without a trailing slash, query or fragment.
fn render_base(url: &Url) -> String {
  let mut result = String::from(&url[..Position::BeforePath]);
  result.push_str(url.path().trim_end_matches('/'));
  result
}

/// Parse a URL by prefixing it with the https:// scheme.
fn parse_with_https_prefix(input: &str) -> Result<Url> {
  Url::parse(&format!("https://{input}"))
    .map_err(|e| anyhow::anyhow!("Failed to parse Jira URL '{input}': {e}"))
}

/// Normalize a Jira base URL.
///
/// Assumes https:// when no scheme is given, rejects schemes other than http
/// and https, and strips trailing slashes, query strings and fragments.
pub fn normalize_jira_url(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    anyhow::bail!("Jira URL cannot be empty");
  }

  // "host:8080" parses as scheme "host", so only trust parses that found a host
  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_https_prefix(trimmed)?,
  };

  if !matches!(url.scheme(), "http" | "https") {
    anyhow::bail!("Unsupported scheme '{}' in Jira URL '{trimmed}'", url.scheme());
  }
  if url.host_str().is_none_or(str::is_empty) {
    anyhow::bail!("Jira URL must have a host: '{trimmed}'");
  }

  Ok(render_base(&url))
}

/// Build the browser URL of an issue.
pub fn issue_browse_url(base_url: &str, issue_key: &str) -> String {
  format!("{}/browse/{issue_key}", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
  use test_case::test_case;

  use super::*;

  #[test_case("https://company.atlassian.net", "https://company.atlassian.net" ; "https kept")]
  #[test_case("http://jira.example.com", "http://jira.example.com" ; "http kept")]
  #[test_case("company.atlassian.net", "https://company.atlassian.net" ; "scheme added")]
  #[test_case("https://company.atlassian.net/", "https://company.atlassian.net" ; "root slash stripped")]
  #[test_case("  company.atlassian.net  ", "https://company.atlassian.net" ; "whitespace trimmed")]
  #[test_case("localhost:8080", "https://localhost:8080" ; "host and port")]
  #[test_case("https://example.com/jira/", "https://example.com/jira" ; "context path kept")]
  #[test_case("HTTPS://Example.com", "https://example.com" ; "scheme and host lowercased")]
  #[test_case("https://example.com/?a=b#frag", "https://example.com" ; "query and fragment dropped")]
  fn test_normalize_jira_url(input: &str, expected: &str) {
    assert_eq!(normalize_jira_url(input).unwrap(), expected);
  }

  #[test]
  fn test_normalize_jira_url_empty() {
    let err = normalize_jira_url("   ").unwrap_err().to_string();
    assert!(err.contains("cannot be empty"));
  }

  #[test]
  fn test_normalize_jira_url_rejects_other_schemes() {
    let err = normalize_jira_url("ftp://example.com").unwrap_err().to_string();
    assert!(err.contains("Unsupported scheme 'ftp'"));
  }

  #[test]
  fn test_issue_browse_url() {
    assert_eq!(
      issue_browse_url("https://company.atlassian.net", "PROJ-1"),
      "https://company.atlassian.net/browse/PROJ-1"
    );
    assert_eq!(
      issue_browse_url("https://company.atlassian.net/", "PROJ-1"),
      "https://company.atlassian.net/browse/PROJ-1"
    );
  }
}
