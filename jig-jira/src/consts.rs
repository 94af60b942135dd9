//! Constants for the jig-jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jig/", env!("CARGO_PKG_VERSION"));

/// Page size used when walking paginated endpoints
pub const PAGE_SIZE: u32 = 50;

/// Largest batch of issues the agile API accepts when moving issues into a
/// sprint
pub const SPRINT_ISSUE_BATCH: usize = 50;
