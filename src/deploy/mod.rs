// ABOUTME: msdeploy execution: tool discovery, process runs, retries, cleanup.
// ABOUTME: Exports the Deployer and the locator/runner seams it depends on.

mod capture;
mod error;
mod executor;
mod locator;
mod runner;

pub use capture::{CaptureSink, ERROR_FILE_NAME, ErrorCapture, WORKSPACE_ENV};
pub use error::{CaptureSetupSnafu, DeployError, DeployErrorKind, ExecError, FailedSnafu};
pub use executor::{DEFAULT_RETRY_COUNT, DeployOutcome, Deployer};
pub use locator::{
    BUNDLED_DIR, ConfiguredPath, InstallRoot, LocateError, LocatorChain, MSDEPLOY_EXE,
    SearchPath, ToolLocator, bundled_default, locate_or_bundled,
};
pub use runner::{Invocation, ProcessRunner, TokioRunner, ToolEnvironment};
