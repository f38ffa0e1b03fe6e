// ABOUTME: Non-fatal cleanup problems found while deploying.
// ABOUTME: Parameters-file and error-capture failures that never change the deployment result.

use std::fmt;
use std::path::{Path, PathBuf};

/// Cleanup problems gathered over one deployment run.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning and log it.
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(path = %warning.path.display(), "{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// A file webdeploy could not read or remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub reason: String,
}

impl Warning {
    fn new(kind: WarningKind, path: &Path, error: &std::io::Error) -> Self {
        Self {
            kind,
            path: path.to_path_buf(),
            reason: error.to_string(),
        }
    }

    pub fn parameters_cleanup(path: &Path, error: &std::io::Error) -> Self {
        Self::new(WarningKind::ParametersCleanup, path, error)
    }

    pub fn capture_read(path: &Path, error: &std::io::Error) -> Self {
        Self::new(WarningKind::CaptureRead, path, error)
    }

    pub fn capture_cleanup(path: &Path, error: &std::io::Error) -> Self {
        Self::new(WarningKind::CaptureCleanup, path, error)
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to {} {}: {}",
            self.kind.action(),
            self.path.display(),
            self.reason
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// The set-parameters file survived the run.
    ParametersCleanup,
    /// The error capture could not be read, so the failure went unclassified.
    CaptureRead,
    /// The error capture survived the run.
    CaptureCleanup,
}

impl WarningKind {
    fn action(self) -> &'static str {
        match self {
            WarningKind::ParametersCleanup => "remove parameters file",
            WarningKind::CaptureRead => "read error capture",
            WarningKind::CaptureCleanup => "remove error capture",
        }
    }
}
