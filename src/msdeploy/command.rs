// ABOUTME: Builds the msdeploy argument string from deployment options.
// ABOUTME: Clause order is fixed; values are wrapped as "'...'" to survive tokenizing.

use std::fmt;

use super::args::split_args;
use crate::types::AppName;

/// Remote root for Java web archives (Tomcat/Jetty webapps on App Service).
pub const WEBAPPS_ROOT: &str = "/site/webapps/";

/// Extension that selects the web-archive content-path branch.
pub const WEB_ARCHIVE_EXT: &str = ".war";

/// Publish-profile credentials for a remote site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishCredentials {
    /// Management host, e.g. `myapp.scm.azurewebsites.net:443`.
    pub publish_url: String,
    pub user_name: String,
    pub password: String,
}

/// Everything needed to assemble one msdeploy invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOptions {
    /// Path to the package archive or folder.
    pub package: String,
    pub app_name: AppName,
    pub virtual_application: Option<String>,
    pub credentials: Option<PublishCredentials>,
    pub remove_additional_files: bool,
    pub exclude_app_data: bool,
    pub take_app_offline: bool,
    pub use_managed_deployment: bool,
    pub set_parameters_file: Option<String>,
    pub additional_arguments: Option<String>,
    pub folder_deployment: bool,
    pub has_parameters_descriptor: bool,
}

impl DeploymentOptions {
    /// Options for a package with every optional behavior switched off,
    /// except managed deployment.
    pub fn new(package: impl Into<String>, app_name: AppName) -> Self {
        Self {
            package: package.into(),
            app_name,
            virtual_application: None,
            credentials: None,
            remove_additional_files: false,
            exclude_app_data: false,
            take_app_offline: false,
            use_managed_deployment: true,
            set_parameters_file: None,
            additional_arguments: None,
            folder_deployment: false,
            has_parameters_descriptor: false,
        }
    }

    /// `app` or `app/virtual-app`.
    pub fn deployment_path(&self) -> String {
        match self.virtual_application.as_deref() {
            Some(vapp) if !vapp.is_empty() => format!("{}/{}", self.app_name, vapp),
            _ => self.app_name.to_string(),
        }
    }

    /// Which source/destination branch these options select.
    pub fn target_kind(&self) -> TargetKind {
        if self.folder_deployment {
            TargetKind::Folder
        } else if has_web_archive_ext(&self.package) {
            TargetKind::WebArchive
        } else {
            TargetKind::Package
        }
    }
}

/// Source/destination shape of a deployment. Exactly one applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// Folder synced as an IIS application.
    Folder,
    /// `.war` archive copied into the webapps directory.
    WebArchive,
    /// Web Deploy package (zip).
    Package,
}

/// A fully assembled msdeploy argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine(String);

impl CommandLine {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split into process arguments.
    pub fn args(&self) -> Vec<String> {
        split_args(&self.0)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Construct the msdeploy argument string for `options`.
///
/// Clause order matters to msdeploy's own parser and is kept stable:
/// verb, source/dest, credentials, setParam, AppOffline, managed-deployment
/// clauses, user arguments, DoNotDeleteRule.
pub fn build_command(options: &DeploymentOptions) -> CommandLine {
    let mut cmd = String::from(" -verb:sync");
    let target = options.deployment_path();

    match options.target_kind() {
        TargetKind::Folder => {
            cmd.push_str(&format!(" -source:IisApp=\"'{}'\"", options.package));
            cmd.push_str(&format!(" -dest:iisApp=\"'{}'\"", target));
        }
        TargetKind::WebArchive => {
            let war = web_archive_destination(
                &options.package,
                options.virtual_application.as_deref(),
            );
            tracing::debug!("WAR destination: {}{}", WEBAPPS_ROOT, war);
            cmd.push_str(&format!(" -source:contentPath=\"'{}'\"", options.package));
            cmd.push_str(&format!(" -dest:contentPath=\"'{}{}'\"", WEBAPPS_ROOT, war));
        }
        TargetKind::Package => {
            cmd.push_str(&format!(" -source:package=\"'{}'\"", options.package));
            if options.has_parameters_descriptor {
                cmd.push_str(" -dest:auto");
            } else {
                cmd.push_str(&format!(" -dest:contentPath=\"'{}'\"", target));
            }
        }
    }

    if let Some(creds) = &options.credentials {
        cmd.push_str(&format!(
            ",ComputerName=\"'https://{}/msdeploy.axd?site={}'\",",
            creds.publish_url, options.app_name
        ));
        cmd.push_str(&format!(
            "UserName=\"'{}'\",Password=\"'{}'\",AuthType=\"'Basic'\"",
            creds.user_name, creds.password
        ));
    }

    if options.has_parameters_descriptor {
        cmd.push_str(&format!(
            " -setParam:name=\"'IIS Web Application Name'\",value=\"'{}'\"",
            target
        ));
    }

    if options.take_app_offline {
        cmd.push_str(" -enableRule:AppOffline");
    }

    if options.use_managed_deployment {
        if let Some(file) = options.set_parameters_file.as_deref().filter(|f| !f.is_empty()) {
            cmd.push_str(&format!(" -setParamFile={} ", file));
        }
        if options.exclude_app_data {
            cmd.push_str(" -skip:Directory=App_Data");
        }
    }

    let extra = options
        .additional_arguments
        .as_deref()
        .filter(|a| !a.is_empty())
        .unwrap_or(" ");
    cmd.push(' ');
    cmd.push_str(extra);

    if !(options.remove_additional_files && options.use_managed_deployment) {
        cmd.push_str(" -enableRule:DoNotDeleteRule");
    }

    tracing::debug!("Constructed msdeploy command line arguments");
    CommandLine(cmd)
}

fn has_web_archive_ext(package: &str) -> bool {
    package.to_ascii_lowercase().ends_with(WEB_ARCHIVE_EXT)
}

/// `<base>[/<vapp>]<ext>` for a web archive, keeping the original extension case.
fn web_archive_destination(package: &str, virtual_application: Option<&str>) -> String {
    let split = package.len() - WEB_ARCHIVE_EXT.len();
    let (stem, ext) = package.split_at(split);
    let base = stem.rsplit(['/', '\\']).next().unwrap_or(stem);

    match virtual_application {
        Some(vapp) if !vapp.is_empty() => format!("{}/{}{}", base, vapp, ext),
        _ => format!("{}{}", base, ext),
    }
}
