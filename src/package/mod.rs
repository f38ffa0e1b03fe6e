// ABOUTME: Deployment package discovery and inspection.
// ABOUTME: Resolves a path pattern to exactly one package and inspects zip contents.

mod archive;
mod discovery;

pub use archive::{PARAMETER_DESCRIPTORS, archive_entries, has_parameters_descriptor};
pub use discovery::{Package, PackageKind, find_packages, resolve_package};

use std::path::PathBuf;

/// Errors from package discovery and inspection.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("web deploy package not found: {0}")]
    NotFound(String),

    #[error("more than one web deploy package found ({count}) for {pattern}")]
    Ambiguous { pattern: String, count: usize },

    #[error("invalid package pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("cannot read archive {}: {reason}", .path.display())]
    Archive { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
