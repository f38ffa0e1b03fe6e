// ABOUTME: Error types for msdeploy execution.
// ABOUTME: Per-attempt ExecError (thiserror) and run-level DeployError (SNAFU).

use std::path::PathBuf;

use snafu::Snafu;

use crate::msdeploy::ErrorCategory;

/// Failure of a single msdeploy attempt.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {
    #[error("failed to launch {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        source: std::io::Error,
    },

    #[error("msdeploy exited with {}", exit_code_text(.0))]
    ExitStatus(Option<i32>),

    #[error("msdeploy wrote to standard error: {0}")]
    Stderr(String),

    #[error("failed to write error capture: {0}")]
    Capture(#[source] std::io::Error),
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Failure of a whole deployment run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum DeployError {
    /// Every attempt failed; `message` is the last attempt's failure.
    #[snafu(display("{message}"))]
    Failed {
        message: String,
        attempts: u32,
        category: Option<ErrorCategory>,
    },

    #[snafu(display("cannot prepare error capture at {}: {source}", path.display()))]
    CaptureSetup {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployErrorKind {
    /// msdeploy failed and the cause was recognized.
    Classified(ErrorCategory),
    /// msdeploy failed for an unrecognized reason.
    Unclassified,
    /// The error-capture file could not be created.
    CaptureSetup,
}

impl DeployError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> DeployErrorKind {
        match self {
            DeployError::Failed {
                category: Some(category),
                ..
            } => DeployErrorKind::Classified(*category),
            DeployError::Failed { category: None, .. } => DeployErrorKind::Unclassified,
            DeployError::CaptureSetup { .. } => DeployErrorKind::CaptureSetup,
        }
    }

    /// Number of attempts made before giving up, if msdeploy ran at all.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            DeployError::Failed { attempts, .. } => Some(*attempts),
            DeployError::CaptureSetup { .. } => None,
        }
    }
}
