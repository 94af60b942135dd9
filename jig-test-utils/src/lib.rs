//! Test utilities shared across the jig workspace
//!
//! This crate provides common testing infrastructure including:
//! - XDG directory mocking ([`EnvTestGuard`])
//! - Scoped environment variables ([`EnvVarGuard`])
//! - HOME directory isolation ([`HomeEnvTestGuard`])
//! - Throwaway jig config files ([`ConfigFileGuard`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod config;
pub mod env;
pub mod home;

// Re-export commonly used items
pub use config::ConfigFileGuard;
pub use env::{EnvTestGuard, EnvVarGuard};
pub use home::HomeEnvTestGuard;
