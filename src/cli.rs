// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use webdeploy::config::Overrides;

#[derive(Parser)]
#[command(name = "webdeploy")]
#[command(about = "Deploy web packages and folders with msdeploy (Web Deploy)")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a webdeploy.yml configuration file
    Init {
        /// Target app (site) name
        #[arg(long)]
        app: Option<String>,

        /// Package path or glob pattern
        #[arg(long)]
        package: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Deploy a package or folder with msdeploy
    Deploy(DeployArgs),
}

#[derive(Args)]
pub struct DeployArgs {
    /// Package path or glob pattern (must match exactly one file or folder)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Target app (site) name
    #[arg(short, long)]
    pub app: Option<String>,

    /// Virtual application under the site
    #[arg(long)]
    pub virtual_application: Option<String>,

    /// Publish-profile management host (remote deployment)
    #[arg(long, requires_all = ["username", "password"])]
    pub publish_url: Option<String>,

    /// Publish-profile user name
    #[arg(long)]
    pub username: Option<String>,

    /// Publish-profile password
    #[arg(long)]
    pub password: Option<String>,

    /// Delete remote files not in the package (managed deployment only)
    #[arg(long)]
    pub remove_additional_files: bool,

    /// Skip the App_Data directory (managed deployment only)
    #[arg(long)]
    pub exclude_app_data: bool,

    /// Take the app offline during deployment
    #[arg(long)]
    pub take_app_offline: bool,

    /// Disable managed deployment semantics
    #[arg(long)]
    pub no_managed_deployment: bool,

    /// SetParameters.xml file (deleted after the run)
    #[arg(long)]
    pub set_parameters_file: Option<String>,

    /// Extra arguments passed to msdeploy verbatim
    #[arg(long, allow_hyphen_values = true)]
    pub additional_arguments: Option<String>,

    /// Path to msdeploy.exe
    #[arg(long)]
    pub msdeploy: Option<PathBuf>,

    /// Print the msdeploy command without running it
    #[arg(long)]
    pub dry_run: bool,
}

impl DeployArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            app: self.app.clone(),
            package: self.package.clone(),
            virtual_application: self.virtual_application.clone(),
            publish_url: self.publish_url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            remove_additional_files: self.remove_additional_files,
            exclude_app_data: self.exclude_app_data,
            take_app_offline: self.take_app_offline,
            no_managed_deployment: self.no_managed_deployment,
            set_parameters_file: self.set_parameters_file.clone(),
            additional_arguments: self.additional_arguments.clone(),
            msdeploy: self.msdeploy.clone(),
        }
    }
}
