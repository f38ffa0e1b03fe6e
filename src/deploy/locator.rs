// ABOUTME: Locates the msdeploy executable.
// ABOUTME: Configured path, versioned install root, search path, and bundled fallback.

use std::path::{Path, PathBuf};

/// Executable name inside an install directory.
pub const MSDEPLOY_EXE: &str = "msdeploy.exe";

/// Directory bundled next to our own executable.
pub const BUNDLED_DIR: &str = "MSDeploy3.6";

/// Oldest supported major version.
pub const MIN_SUPPORTED_VERSION: f64 = 3.0;

/// Error during msdeploy discovery.
#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("msdeploy not found: {0}")]
    NotFound(String),

    #[error("unsupported installed msdeploy version found: {0}")]
    UnsupportedVersion(f64),

    #[error("I/O error while locating msdeploy: {0}")]
    Io(#[from] std::io::Error),
}

/// Something that can find the msdeploy executable.
pub trait ToolLocator: Send + Sync {
    fn locate(&self) -> Result<PathBuf, LocateError>;
}

/// An explicitly configured executable path.
#[derive(Debug, Clone)]
pub struct ConfiguredPath(pub PathBuf);

impl ToolLocator for ConfiguredPath {
    fn locate(&self) -> Result<PathBuf, LocateError> {
        if self.0.is_file() {
            Ok(self.0.clone())
        } else {
            Err(LocateError::NotFound(self.0.display().to_string()))
        }
    }
}

/// An install root holding one directory per installed version
/// (`<root>/3.6/msdeploy.exe`, `<root>/4/msdeploy.exe`, ...).
/// The highest numeric version wins.
#[derive(Debug, Clone)]
pub struct InstallRoot(pub PathBuf);

impl ToolLocator for InstallRoot {
    fn locate(&self) -> Result<PathBuf, LocateError> {
        let mut latest: Option<(f64, PathBuf)> = None;

        for entry in std::fs::read_dir(&self.0)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let Some(version) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<f64>().ok())
            else {
                continue;
            };
            if latest.as_ref().is_none_or(|(v, _)| version > *v) {
                latest = Some((version, entry.path()));
            }
        }

        match latest {
            None => Err(LocateError::NotFound(format!(
                "no versioned install under {}",
                self.0.display()
            ))),
            Some((version, _)) if version < MIN_SUPPORTED_VERSION => {
                Err(LocateError::UnsupportedVersion(version))
            }
            Some((_, dir)) => Ok(dir.join(MSDEPLOY_EXE)),
        }
    }
}

/// Lookup on the process search path.
#[derive(Debug, Clone, Default)]
pub struct SearchPath;

impl ToolLocator for SearchPath {
    fn locate(&self) -> Result<PathBuf, LocateError> {
        ["msdeploy", MSDEPLOY_EXE]
            .iter()
            .find_map(|name| which::which(name).ok())
            .ok_or_else(|| LocateError::NotFound("not on PATH".to_string()))
    }
}

/// Tries each locator in order; the first success wins.
#[derive(Default)]
pub struct LocatorChain {
    locators: Vec<Box<dyn ToolLocator>>,
}

impl LocatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl ToolLocator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }
}

impl ToolLocator for LocatorChain {
    fn locate(&self) -> Result<PathBuf, LocateError> {
        let mut last = LocateError::NotFound("no locators configured".to_string());
        for locator in &self.locators {
            match locator.locate() {
                Ok(path) => return Ok(path),
                Err(e) => {
                    tracing::debug!("msdeploy locator failed: {}", e);
                    last = e;
                }
            }
        }
        Err(last)
    }
}

/// `<dir of current executable>/MSDeploy3.6/msdeploy.exe`.
pub fn bundled_default() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    exe_dir.join(BUNDLED_DIR).join(MSDEPLOY_EXE)
}

/// Locate msdeploy, falling back to the bundled copy on failure.
pub fn locate_or_bundled(locator: &dyn ToolLocator) -> PathBuf {
    match locator.locate() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("{}; using bundled msdeploy", e);
            bundled_default()
        }
    }
}
