// ABOUTME: msdeploy command-line construction and output interpretation.
// ABOUTME: Exports the tokenizer, command builder, and error classifier.

mod args;
mod classify;
mod command;

pub use args::split_args;
pub use classify::{
    Advisory, ErrorCategory, ErrorReport, RULES, Rule, classify, classify_with,
    report_captured_errors,
};
pub use command::{
    CommandLine, DeploymentOptions, PublishCredentials, TargetKind, WEB_ARCHIVE_EXT,
    WEBAPPS_ROOT, build_command,
};
