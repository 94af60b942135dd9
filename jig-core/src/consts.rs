//! Core constants shared across jig components.

/// Environment variable pointing at an alternative config file.
pub const ENV_JIG_CONFIG: &str = "JIG_CONFIG";

/// Environment variable overriding `jira_url` from the config file.
pub const ENV_JIRA_URL: &str = "JIRA_URL";

/// Environment variable overriding `user` from the config file.
pub const ENV_JIRA_USER: &str = "JIRA_USER";

/// Environment variable overriding `api_token` from the config file.
pub const ENV_JIRA_API_TOKEN: &str = "JIRA_API_TOKEN";

/// File name of the config file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Largest number of keys a single `FROM..TO` range may expand to.
pub const MAX_RANGE_LEN: u64 = 1000;
