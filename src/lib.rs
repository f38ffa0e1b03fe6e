// ABOUTME: Library root for webdeploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod msdeploy;
pub mod output;
pub mod package;
pub mod types;
