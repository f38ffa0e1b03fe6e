// ABOUTME: Transient on-disk capture of msdeploy's standard error.
// ABOUTME: Truncated at the start of every attempt, flushed before it is read.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// File name of the capture inside the workspace root.
pub const ERROR_FILE_NAME: &str = "error.txt";

/// Environment variable naming the workspace root.
pub const WORKSPACE_ENV: &str = "GITHUB_WORKSPACE";

/// Location of the error-capture file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCapture {
    path: PathBuf,
}

impl ErrorCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<root>/error.txt`.
    pub fn in_dir(root: &Path) -> Self {
        Self::new(root.join(ERROR_FILE_NAME))
    }

    /// Capture in the workspace root, or the working directory if unset.
    pub fn from_env() -> Self {
        let root = std::env::var_os(WORKSPACE_ENV).unwrap_or_else(OsString::new);
        Self::in_dir(Path::new(&root))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create or truncate the capture file for a new attempt.
    pub async fn open(&self) -> std::io::Result<CaptureSink> {
        let file = File::create(&self.path).await?;
        Ok(CaptureSink { file, written: 0 })
    }
}

/// Write end of an error capture for one attempt.
#[derive(Debug)]
pub struct CaptureSink {
    file: File,
    written: u64,
}

impl CaptureSink {
    pub async fn write(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        self.file.write_all(bytes).await?;
        self.written += bytes.len() as u64;
        Ok(())
    }

    /// Whether nothing was written during this attempt.
    pub fn is_empty(&self) -> bool {
        self.written == 0
    }

    /// Flush and close. The classifier must only read after this returns.
    pub async fn finish(mut self) -> std::io::Result<()> {
        self.file.flush().await?;
        self.file.sync_all().await
    }
}
