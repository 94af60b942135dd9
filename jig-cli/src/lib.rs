//! # Jig CLI Library
//!
//! Command definitions and the glue between them and the Jira client: config
//! loading, user lookup, JQL building, listing tables and CSV import.

pub mod cli;
pub mod clients;
pub mod consts;
pub mod import;
pub mod jql;
pub mod panic;
pub mod prompt;
pub mod tables;
pub mod users;
