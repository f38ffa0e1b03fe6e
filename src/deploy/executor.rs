// ABOUTME: Runs an msdeploy deployment with bounded retries.
// ABOUTME: Builds the command, captures stderr per attempt, triages failures, cleans up.

use std::path::Path;

use snafu::ResultExt;

use super::capture::ErrorCapture;
use super::error::{CaptureSetupSnafu, DeployError, ExecError};
use super::locator::{ToolLocator, locate_or_bundled};
use super::runner::{Invocation, ProcessRunner, ToolEnvironment, first_line};
use crate::diagnostics::{Diagnostics, Warning};
use crate::msdeploy::{DeploymentOptions, build_command, report_captured_errors};

/// Total attempts per deployment.
pub const DEFAULT_RETRY_COUNT: u32 = 3;

/// Result of a successful deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployOutcome {
    /// Attempts used, including the successful one.
    pub attempts: u32,
    /// Whether this was a publish-profile (remote) deployment.
    pub remote: bool,
}

/// Drives msdeploy through a locator and a process runner.
pub struct Deployer<L, R> {
    locator: L,
    runner: R,
    capture: ErrorCapture,
    max_attempts: u32,
}

impl<L: ToolLocator, R: ProcessRunner> Deployer<L, R> {
    pub fn new(locator: L, runner: R, capture: ErrorCapture) -> Self {
        Self {
            locator,
            runner,
            capture,
            max_attempts: DEFAULT_RETRY_COUNT,
        }
    }

    pub fn capture(&self) -> &ErrorCapture {
        &self.capture
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Deploy `options`, retrying failed attempts immediately.
    ///
    /// On failure the error-capture file is classified and the last attempt's
    /// message is returned. The set-parameters file is deleted on every exit
    /// path; failures doing so are recorded in `diag` only.
    pub async fn deploy(
        &self,
        options: &DeploymentOptions,
        diag: &mut Diagnostics,
    ) -> Result<DeployOutcome, DeployError> {
        let tool = locate_or_bundled(&self.locator);
        tracing::debug!("Found msdeploy path: '{}'", tool.display());
        let env = ToolEnvironment::for_tool(tool);

        let result = self.run_with_retries(&env, options, diag).await;

        if let Some(file) = options.set_parameters_file.as_deref() {
            remove_parameters_file(Path::new(file), diag);
        }

        result
    }

    async fn run_with_retries(
        &self,
        env: &ToolEnvironment,
        options: &DeploymentOptions,
        diag: &mut Diagnostics,
    ) -> Result<DeployOutcome, DeployError> {
        let command = build_command(options);
        let remote = options.credentials.is_some();
        let mut remaining = self.max_attempts;

        loop {
            remaining -= 1;
            let attempt = self.max_attempts - remaining;

            match self.attempt(env, command.as_str()).await {
                Ok(()) => {
                    // The capture file only carries failures; drop the empty one.
                    report_captured_errors(self.capture.path(), diag);
                    if remote {
                        tracing::info!("Package deployment succeeded");
                    }
                    return Ok(DeployOutcome {
                        attempts: attempt,
                        remote,
                    });
                }
                Err(AttemptError::Setup(e)) => {
                    return Err(e).context(CaptureSetupSnafu {
                        path: self.capture.path().to_path_buf(),
                    });
                }
                Err(AttemptError::Exec(e)) if remaining > 0 => {
                    tracing::warn!("{}", e);
                    tracing::warn!("Retrying deployment (attempt {} failed)", attempt);
                }
                Err(AttemptError::Exec(e)) => {
                    tracing::error!("Package deployment failed");
                    tracing::debug!("{:?}", e);
                    let report = report_captured_errors(self.capture.path(), diag);
                    return Err(DeployError::Failed {
                        message: e.to_string(),
                        attempts: attempt,
                        category: report.and_then(|r| r.category),
                    });
                }
            }
        }
    }

    async fn attempt(&self, env: &ToolEnvironment, command: &str) -> Result<(), AttemptError> {
        let mut sink = self.capture.open().await.map_err(AttemptError::Setup)?;

        tracing::debug!("the argument string is: {}", command);
        let args = crate::msdeploy::split_args(command);
        for (i, arg) in args.iter().enumerate() {
            tracing::debug!("arg#{}: {}", i, arg);
        }

        let result = self
            .runner
            .run(&Invocation { env, args: &args }, &mut sink)
            .await;
        let wrote_stderr = !sink.is_empty();

        // Close the capture before anyone reads it.
        let finished = sink.finish().await;

        result.map_err(AttemptError::Exec)?;
        finished.map_err(|e| AttemptError::Exec(ExecError::Capture(e)))?;
        if wrote_stderr {
            let bytes = tokio::fs::read(self.capture.path())
                .await
                .map_err(|e| AttemptError::Exec(ExecError::Capture(e)))?;
            return Err(AttemptError::Exec(ExecError::Stderr(first_line(&bytes))));
        }
        Ok(())
    }
}

enum AttemptError {
    Setup(std::io::Error),
    Exec(ExecError),
}

fn remove_parameters_file(path: &Path, diag: &mut Diagnostics) {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };

    match result {
        Ok(()) => tracing::debug!("Removed parameters file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => diag.warn(Warning::parameters_cleanup(path, &e)),
    }
}
