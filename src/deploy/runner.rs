// ABOUTME: Process execution for msdeploy attempts.
// ABOUTME: Scoped search-path environment and the tokio-backed runner.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::capture::CaptureSink;
use super::error::ExecError;

/// Environment an msdeploy child runs in.
///
/// The tool's directory is prepended to the search path of the child only;
/// the parent process environment is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolEnvironment {
    tool: PathBuf,
    search_path: OsString,
}

impl ToolEnvironment {
    /// Environment derived from the current process `PATH`.
    pub fn for_tool(tool: impl Into<PathBuf>) -> Self {
        Self::with_base_path(tool, std::env::var_os("PATH"))
    }

    /// Environment with the tool directory prepended to `base`.
    pub fn with_base_path(tool: impl Into<PathBuf>, base: Option<OsString>) -> Self {
        let tool = tool.into();
        let mut dirs: Vec<PathBuf> = Vec::new();
        if let Some(dir) = tool.parent().filter(|d| !d.as_os_str().is_empty()) {
            dirs.push(dir.to_path_buf());
        }
        if let Some(base) = &base {
            dirs.extend(std::env::split_paths(base));
        }

        // A PATH entry containing the separator can't be joined; keep the base.
        let search_path = std::env::join_paths(&dirs)
            .unwrap_or_else(|_| base.clone().unwrap_or_default());

        Self { tool, search_path }
    }

    pub fn tool(&self) -> &Path {
        &self.tool
    }

    pub fn search_path(&self) -> &OsStr {
        &self.search_path
    }
}

/// One msdeploy launch: where, and with which arguments.
#[derive(Debug, Clone, Copy)]
pub struct Invocation<'a> {
    pub env: &'a ToolEnvironment,
    pub args: &'a [String],
}

/// Runs msdeploy.
///
/// Implementations write the child's standard error into `stderr`. Any
/// standard-error output must be reported as a failure.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(
        &self,
        invocation: &Invocation<'_>,
        stderr: &mut CaptureSink,
    ) -> Result<(), ExecError>;
}

/// Runs msdeploy as a child process via tokio.
#[derive(Debug, Clone, Default)]
pub struct TokioRunner;

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(
        &self,
        invocation: &Invocation<'_>,
        stderr: &mut CaptureSink,
    ) -> Result<(), ExecError> {
        let program = invocation.env.tool();
        let mut cmd = Command::new(program);
        add_args(&mut cmd, invocation.args);

        let output = cmd
            .env("PATH", invocation.env.search_path())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| ExecError::Spawn {
                program: program.to_path_buf(),
                source,
            })?;

        if !output.stderr.is_empty() {
            stderr
                .write(&output.stderr)
                .await
                .map_err(ExecError::Capture)?;
            return Err(ExecError::Stderr(first_line(&output.stderr)));
        }

        if !output.status.success() {
            return Err(ExecError::ExitStatus(output.status.code()));
        }

        Ok(())
    }
}

// msdeploy parses its own quoting, so arguments are passed verbatim on Windows.
#[cfg(windows)]
fn add_args(cmd: &mut Command, args: &[String]) {
    for arg in args {
        cmd.raw_arg(arg);
    }
}

#[cfg(not(windows))]
fn add_args(cmd: &mut Command, args: &[String]) {
    cmd.args(args);
}

/// First non-blank line of tool output, lossily decoded.
pub(super) fn first_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_dir_is_prepended() {
        let base = std::env::join_paths(["/usr/bin", "/bin"]).unwrap();
        let env = ToolEnvironment::with_base_path("/opt/msdeploy/msdeploy.exe", Some(base));

        let dirs: Vec<PathBuf> = std::env::split_paths(env.search_path()).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/opt/msdeploy"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin"),
            ]
        );
        assert_eq!(env.tool(), Path::new("/opt/msdeploy/msdeploy.exe"));
    }

    #[test]
    fn bare_tool_name_keeps_base_path() {
        let env = ToolEnvironment::with_base_path("msdeploy", Some(OsString::from("/usr/bin")));
        assert_eq!(env.search_path(), OsStr::new("/usr/bin"));
    }

    #[test]
    fn missing_base_path() {
        let env = ToolEnvironment::with_base_path("/opt/tool/msdeploy", None);
        assert_eq!(env.search_path(), OsStr::new("/opt/tool"));
    }

    #[test]
    fn first_line_skips_blank_lines() {
        assert_eq!(first_line(b"\n\n  Error: FILE_IN_USE \nmore"), "Error: FILE_IN_USE");
        assert_eq!(first_line(b""), "");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stderr_output_fails_the_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let capture = super::super::capture::ErrorCapture::in_dir(dir.path());
        let mut sink = capture.open().await.unwrap();

        let env = ToolEnvironment::for_tool("/bin/sh");
        let args = vec!["-c".to_string(), "echo oops >&2".to_string()];
        let result = TokioRunner
            .run(&Invocation { env: &env, args: &args }, &mut sink)
            .await;
        sink.finish().await.unwrap();

        assert!(matches!(result, Err(ExecError::Stderr(ref line)) if line == "oops"));
        assert_eq!(std::fs::read_to_string(capture.path()).unwrap(), "oops\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_fails_the_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let capture = super::super::capture::ErrorCapture::in_dir(dir.path());
        let mut sink = capture.open().await.unwrap();

        let env = ToolEnvironment::for_tool("/bin/sh");
        let args = vec!["-c".to_string(), "exit 3".to_string()];
        let result = TokioRunner
            .run(&Invocation { env: &env, args: &args }, &mut sink)
            .await;

        assert!(matches!(result, Err(ExecError::ExitStatus(Some(3)))));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let dir = tempfile::tempdir().unwrap();
        let capture = super::super::capture::ErrorCapture::in_dir(dir.path());
        let mut sink = capture.open().await.unwrap();

        let env = ToolEnvironment::for_tool(dir.path().join("no-such-msdeploy"));
        let result = TokioRunner
            .run(&Invocation { env: &env, args: &[] }, &mut sink)
            .await;

        assert!(matches!(result, Err(ExecError::Spawn { .. })));
    }
}
