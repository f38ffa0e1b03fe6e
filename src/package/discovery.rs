// ABOUTME: Resolves a package path or glob pattern to concrete files/folders.
// ABOUTME: Walks from the literal prefix and matches with gitignore-style globs.

use std::path::{Component, Path, PathBuf};

use ignore::overrides::OverrideBuilder;
use walkdir::WalkDir;

use super::PackageError;

/// Whether a package is a folder or an archive file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Folder,
    Archive,
}

/// A resolved deployment package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    pub path: PathBuf,
    pub kind: PackageKind,
}

impl Package {
    /// Inspect `path` on disk.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self, PackageError> {
        let path = path.into();
        let metadata = std::fs::metadata(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => PackageError::NotFound(path.display().to_string()),
            _ => PackageError::Io(e),
        })?;

        let kind = if metadata.is_dir() {
            PackageKind::Folder
        } else {
            PackageKind::Archive
        };
        Ok(Self { path, kind })
    }

    pub fn is_folder(&self) -> bool {
        self.kind == PackageKind::Folder
    }

    /// Path as the string handed to msdeploy.
    pub fn locator(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

fn has_wildcard(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Expand a path pattern to existing paths, sorted.
///
/// A pattern without wildcards yields itself when it exists. Otherwise the
/// walk starts at the longest wildcard-free directory prefix.
pub fn find_packages(pattern: &str) -> Result<Vec<PathBuf>, PackageError> {
    if !has_wildcard(pattern) {
        let path = PathBuf::from(pattern);
        return Ok(if path.exists() { vec![path] } else { vec![] });
    }

    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in Path::new(pattern).components() {
        let text = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !has_wildcard(&text) {
            base.push(component.as_os_str());
        } else if !matches!(component, Component::CurDir) {
            rest.push(text.into_owned());
        }
    }

    // The last literal component is part of the match when nothing follows it.
    if rest.is_empty() {
        return Ok(if base.exists() { vec![base] } else { vec![] });
    }

    let walk_root = if base.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        base.clone()
    };
    if !walk_root.is_dir() {
        return Ok(vec![]);
    }

    let glob = format!("/{}", rest.join("/"));
    let mut builder = OverrideBuilder::new(&walk_root);
    builder
        .add(&glob)
        .map_err(|e| PackageError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
    let overrides = builder.build().map_err(|e| PackageError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;

    let max_depth = if rest.iter().any(|c| c.contains("**")) {
        usize::MAX
    } else {
        rest.len()
    };

    let mut found = Vec::new();
    let walker = WalkDir::new(&walk_root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!("skipping unreadable path during package search: {}", e);
                continue;
            }
        };
        let is_dir = entry.file_type().is_dir();
        if !overrides.matched(entry.path(), is_dir).is_whitelist() {
            continue;
        }
        let path = if base.as_os_str().is_empty() {
            entry
                .path()
                .strip_prefix(&walk_root)
                .unwrap_or(entry.path())
                .to_path_buf()
        } else {
            entry.path().to_path_buf()
        };
        found.push(path);
    }

    found.sort();
    Ok(found)
}

/// Resolve a pattern to exactly one package.
pub fn resolve_package(pattern: &str) -> Result<Package, PackageError> {
    let mut matches = find_packages(pattern)?;
    match matches.len() {
        0 => Err(PackageError::NotFound(pattern.to_string())),
        1 => Package::from_path(matches.remove(0)),
        count => Err(PackageError::Ambiguous {
            pattern: pattern.to_string(),
            count,
        }),
    }
}
