// ABOUTME: Integration tests for msdeploy error classification.
// ABOUTME: Covers rule matching, advisories, and error-capture file triage.

use std::fs;
use webdeploy::diagnostics::Diagnostics;
use webdeploy::msdeploy::{Advisory, ErrorCategory, classify, report_captured_errors};

#[test]
fn file_in_use_is_classified_with_advisory() {
    let text = "Error Code: ERROR_FILE_IN_USE\nMore Information: Web Deploy cannot modify the file 'app.dll'";
    let category = classify(text);

    assert_eq!(category, Some(ErrorCategory::FileInUse));
    assert_eq!(
        category.and_then(|c| c.advisory()),
        Some(Advisory::Warning("Try to deploy web app with rename option set"))
    );
}

#[test]
fn empty_text_is_unclassified() {
    assert_eq!(classify(""), None);
}

#[test]
fn unknown_text_is_unclassified() {
    assert_eq!(classify("Error: something unexpected happened"), None);
}

#[test]
fn each_category_is_recognized() {
    let cases = [
        (
            "ERROR_INSUFFICIENT_ACCESS_TO_SITE_FOLDER",
            ErrorCategory::InsufficientAccess,
        ),
        (
            r"An error was encountered when processing operation 'Delete Directory' on 'D:\home\site\wwwroot\app_data\jobs'",
            ErrorCategory::WebJobsInProgress,
        ),
        (
            "Unable to read data from the transport connection",
            ErrorCategory::TransportConnection,
        ),
        (
            "ERROR_CONNECTION_TERMINATED",
            ErrorCategory::ConnectionTerminated,
        ),
        (
            "ERROR_CERTIFICATE_VALIDATION_FAILED",
            ErrorCategory::CertificateValidationFailed,
        ),
    ];

    for (text, expected) in cases {
        assert_eq!(classify(text), Some(expected), "text: {text}");
    }
}

#[test]
fn report_classifies_and_removes_capture() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.txt");
    fs::write(&path, "Error: FILE_IN_USE").unwrap();

    let mut diag = Diagnostics::default();
    let report = report_captured_errors(&path, &mut diag).unwrap();

    assert_eq!(report.category, Some(ErrorCategory::FileInUse));
    assert_eq!(report.text, "Error: FILE_IN_USE");
    assert!(!path.exists());
    assert!(!diag.has_warnings());
}

#[test]
fn report_appends_transport_hint() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.txt");
    fs::write(&path, "The underlying transport connection was closed. ").unwrap();

    let mut diag = Diagnostics::default();
    let report = report_captured_errors(&path, &mut diag).unwrap();

    assert_eq!(report.category, Some(ErrorCategory::TransportConnection));
    assert!(
        report
            .text
            .ends_with("Update machine to enable secure connection")
    );
}

#[test]
fn empty_capture_is_removed_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("error.txt");
    fs::write(&path, "").unwrap();

    let mut diag = Diagnostics::default();
    assert!(report_captured_errors(&path, &mut diag).is_none());
    assert!(!path.exists());
}

#[test]
fn missing_capture_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut diag = Diagnostics::default();

    assert!(report_captured_errors(&dir.path().join("error.txt"), &mut diag).is_none());
    assert!(!diag.has_warnings());
}
