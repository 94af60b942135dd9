//! # Jira API Errors
//!
//! Maps non-success HTTP responses to a small typed error so callers can tell
//! a Jira-side refusal apart from transport or parsing failures.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// An error response returned by Jira
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JiraApiError {
  #[error("Authentication failed. Please check your Jira credentials.")]
  Unauthorized,
  #[error("Permission denied for {0}")]
  Forbidden(String),
  #[error("{0} not found")]
  NotFound(String),
  #[error("Jira rejected the request: {0}")]
  BadRequest(String),
  #[error("Unexpected error: HTTP {status} - {body}")]
  Unexpected { status: StatusCode, body: String },
}

/// Standard Jira error body
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ErrorBody {
  error_messages: Vec<String>,
  errors: serde_json::Map<String, serde_json::Value>,
}

/// Flatten a Jira error body into one line, falling back to the raw text
fn summarize_body(body: &str) -> String {
  let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
    return body.trim().to_string();
  };

  let mut messages = parsed.error_messages;
  messages.extend(parsed.errors.into_iter().map(|(field, value)| match value {
    serde_json::Value::String(message) => format!("{field}: {message}"),
    other => format!("{field}: {other}"),
  }));

  if messages.is_empty() {
    body.trim().to_string()
  } else {
    messages.join("; ")
  }
}

impl JiraApiError {
  /// Build the error for a response status and body.
  ///
  /// `subject` names what was being accessed, e.g. `Issue PROJ-1`.
  pub fn from_status(status: StatusCode, subject: &str, body: &str) -> Self {
    match status {
      StatusCode::UNAUTHORIZED => Self::Unauthorized,
      StatusCode::FORBIDDEN => Self::Forbidden(subject.to_string()),
      StatusCode::NOT_FOUND => Self::NotFound(subject.to_string()),
      StatusCode::BAD_REQUEST => Self::BadRequest(summarize_body(body)),
      _ => Self::Unexpected {
        status,
        body: summarize_body(body),
      },
    }
  }
}

/// Consume an unsuccessful response and turn it into an error
pub(crate) async fn api_error(response: Response, subject: &str) -> anyhow::Error {
  let status = response.status();
  let body = response.text().await.unwrap_or_default();
  tracing::debug!("Jira returned HTTP {status} for {subject}: {body}");
  JiraApiError::from_status(status, subject, &body).into()
}
