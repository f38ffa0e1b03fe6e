// ABOUTME: Validated domain types.
// ABOUTME: Currently the target application name.

mod app_name;

pub use app_name::{AppName, AppNameError};
