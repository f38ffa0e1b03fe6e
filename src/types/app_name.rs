// ABOUTME: Validated target application (site) name.
// ABOUTME: Rejects names that would break msdeploy's "'...'" value quoting.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppNameError {
    #[error("app name cannot be empty")]
    Empty,

    #[error("invalid character in app name: '{0}'")]
    InvalidChar(char),
}

/// Name of the target site. IIS site names may contain spaces
/// (e.g. `Default Web Site`), so only quoting characters are refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppName(String);

impl AppName {
    pub fn new(value: &str) -> Result<Self, AppNameError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(AppNameError::Empty);
        }

        if let Some(c) = trimmed
            .chars()
            .find(|c| matches!(c, '"' | '\'' | '\\') || c.is_control())
        {
            return Err(AppNameError::InvalidChar(c));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
