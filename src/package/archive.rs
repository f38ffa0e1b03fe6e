// ABOUTME: Reads entry names from zip packages.
// ABOUTME: Detects parameters.xml / systemInfo.xml descriptors for parameterized deploys.

use std::fs::File;
use std::path::Path;

use super::PackageError;

/// Descriptor files that mark a package as parameterized (lowercase).
pub const PARAMETER_DESCRIPTORS: &[&str] = &["parameters.xml", "systeminfo.xml"];

/// Names of all entries inside a zip archive.
pub fn archive_entries(path: &Path) -> Result<Vec<String>, PackageError> {
    let archive_error = |reason: String| PackageError::Archive {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path)?;
    let archive = zip::ZipArchive::new(file).map_err(|e| archive_error(e.to_string()))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

/// Whether the archive contains a parameters descriptor at any depth.
pub fn has_parameters_descriptor(path: &Path) -> Result<bool, PackageError> {
    let entries = archive_entries(path)?;
    Ok(entries.iter().any(|entry| is_descriptor(entry)))
}

fn is_descriptor(entry: &str) -> bool {
    let name = entry.rsplit(['/', '\\']).next().unwrap_or(entry);
    PARAMETER_DESCRIPTORS
        .iter()
        .any(|d| name.eq_ignore_ascii_case(d))
}
