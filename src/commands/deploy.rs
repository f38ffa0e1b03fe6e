// ABOUTME: Deploy command implementation.
// ABOUTME: Resolves options, runs the Deployer, and reports the result.

use webdeploy::config::Config;
use webdeploy::deploy::{Deployer, ErrorCapture, TokioRunner};
use webdeploy::diagnostics::Diagnostics;
use webdeploy::error::Result;
use webdeploy::msdeploy::build_command;
use webdeploy::output::Output;

/// Deploy the configured package.
pub async fn deploy(config: Config, dry_run: bool, mut output: Output) -> Result<()> {
    output.start_timer();

    let options = config.to_options()?;
    output.progress(&format!(
        "Deploying {} to {}",
        options.package,
        options.deployment_path()
    ));

    if dry_run {
        let command = build_command(&options);
        output.command(command.as_str(), &command.args());
        return Ok(());
    }

    let deployer = Deployer::new(config.tool.locator(), TokioRunner, ErrorCapture::from_env());
    let mut diag = Diagnostics::default();

    let result = deployer.deploy(&options, &mut diag).await;

    // Emit collected warnings
    for warning in diag.warnings() {
        output.warning(&warning.to_string());
    }

    let outcome = result?;
    output.success(&format!(
        "Deployment complete after {} attempt(s)",
        outcome.attempts
    ));
    Ok(())
}
