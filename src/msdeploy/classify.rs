// ABOUTME: Maps msdeploy error output to known failure categories.
// ABOUTME: Ordered pattern rules, advisories, and error-capture file triage.

use std::fmt;
use std::io;
use std::path::Path;

use crate::diagnostics::{Diagnostics, Warning};

/// Known msdeploy failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The site folder is locked against writes.
    InsufficientAccess,
    /// A WebJob (or another deployment) is holding `app_data/jobs`.
    WebJobsInProgress,
    /// A file in the site is locked by the running app.
    FileInUse,
    /// TLS/transport level failure talking to the management endpoint.
    TransportConnection,
    /// The remote side dropped the connection.
    ConnectionTerminated,
    /// The management endpoint's certificate was rejected.
    CertificateValidationFailed,
}

impl ErrorCategory {
    /// Stable error code, as reported by the Web Deploy tooling.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCategory::InsufficientAccess => "ERROR_INSUFFICIENT_ACCESS_TO_SITE_FOLDER",
            ErrorCategory::WebJobsInProgress => "WebJobsInProgressIssue",
            ErrorCategory::FileInUse => "FILE_IN_USE",
            ErrorCategory::TransportConnection => "transport connection",
            ErrorCategory::ConnectionTerminated => "ERROR_CONNECTION_TERMINATED",
            ErrorCategory::CertificateValidationFailed => "ERROR_CERTIFICATE_VALIDATION_FAILED",
        }
    }

    /// Console advice for this category, if there is any.
    pub fn advisory(&self) -> Option<Advisory> {
        match self {
            ErrorCategory::InsufficientAccess => Some(Advisory::Warning(
                "Try deploying again with app offline option set",
            )),
            ErrorCategory::WebJobsInProgress => {
                Some(Advisory::Warning("Web deployment already in progress"))
            }
            ErrorCategory::FileInUse => Some(Advisory::Warning(
                "Try to deploy web app with rename option set",
            )),
            ErrorCategory::TransportConnection => Some(Advisory::Hint(
                "Update machine to enable secure connection",
            )),
            ErrorCategory::ConnectionTerminated | ErrorCategory::CertificateValidationFailed => {
                None
            }
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Advice attached to a classified failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advisory {
    /// Shown as a separate warning.
    Warning(&'static str),
    /// Appended to the reported error text.
    Hint(&'static str),
}

/// One classification rule: substring to look for, category it implies.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub pattern: &'static str,
    pub category: ErrorCategory,
}

/// Classification rules in priority order. First match wins.
pub const RULES: &[Rule] = &[
    Rule {
        pattern: "ERROR_INSUFFICIENT_ACCESS_TO_SITE_FOLDER",
        category: ErrorCategory::InsufficientAccess,
    },
    Rule {
        pattern: "An error was encountered when processing operation 'Delete Directory' on",
        category: ErrorCategory::WebJobsInProgress,
    },
    Rule {
        pattern: "FILE_IN_USE",
        category: ErrorCategory::FileInUse,
    },
    Rule {
        pattern: "transport connection",
        category: ErrorCategory::TransportConnection,
    },
    Rule {
        pattern: "ERROR_CONNECTION_TERMINATED",
        category: ErrorCategory::ConnectionTerminated,
    },
    Rule {
        pattern: "ERROR_CERTIFICATE_VALIDATION_FAILED",
        category: ErrorCategory::CertificateValidationFailed,
    },
];

/// Classify error text against [`RULES`].
pub fn classify(text: &str) -> Option<ErrorCategory> {
    classify_with(RULES, text)
}

/// Classify error text against a custom rule list.
pub fn classify_with(rules: &[Rule], text: &str) -> Option<ErrorCategory> {
    if text.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|rule| text.contains(rule.pattern))
        .map(|rule| rule.category)
}

/// What was found in an error-capture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Captured text, with any hint appended.
    pub text: String,
    pub category: Option<ErrorCategory>,
}

/// Read, classify, log and delete an error-capture file.
///
/// A missing file is a no-op. The file is removed whether or not it was
/// empty or matched a category; removal failures are recorded as warnings.
pub fn report_captured_errors(path: &Path, diag: &mut Diagnostics) -> Option<ErrorReport> {
    let content = match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            diag.warn(Warning::capture_read(path, &e));
            String::new()
        }
    };

    let report = (!content.is_empty()).then(|| {
        let category = classify(&content);
        let mut text = content;

        match category.and_then(|c| c.advisory()) {
            Some(Advisory::Warning(message)) => tracing::warn!("{}", message),
            Some(Advisory::Hint(hint)) => text.push_str(hint),
            None => {}
        }

        tracing::error!("{}", text);
        ErrorReport { text, category }
    });

    if let Err(e) = std::fs::remove_file(path)
        && e.kind() != io::ErrorKind::NotFound
    {
        diag.warn(Warning::capture_cleanup(path, &e));
    }

    report
}
