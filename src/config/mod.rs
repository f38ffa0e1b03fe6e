// ABOUTME: Configuration types and parsing for webdeploy.yml.
// ABOUTME: Handles YAML parsing, CLI overrides, and resolution into deployment options.

mod env_value;
mod init;

pub use env_value::EnvValue;
pub use init::init_config;

use crate::deploy::{ConfiguredPath, InstallRoot, LocatorChain, SearchPath};
use crate::error::{Error, Result};
use crate::msdeploy::{DeploymentOptions, PublishCredentials};
use crate::package::{self, Package};
use crate::types::AppName;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "webdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "webdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".webdeploy/config.yml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Target site name.
    #[serde(default)]
    pub app: Option<String>,

    /// Package path or glob pattern.
    #[serde(default)]
    pub package: Option<String>,

    #[serde(default)]
    pub virtual_application: Option<String>,

    #[serde(default)]
    pub publish: Option<PublishConfig>,

    #[serde(default)]
    pub remove_additional_files: bool,

    #[serde(default)]
    pub exclude_app_data: bool,

    #[serde(default)]
    pub take_app_offline: bool,

    #[serde(default = "default_managed_deployment")]
    pub use_managed_deployment: bool,

    #[serde(default)]
    pub set_parameters_file: Option<String>,

    #[serde(default)]
    pub additional_arguments: Option<String>,

    #[serde(default)]
    pub tool: ToolConfig,
}

fn default_managed_deployment() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: None,
            package: None,
            virtual_application: None,
            publish: None,
            remove_additional_files: false,
            exclude_app_data: false,
            take_app_offline: false,
            use_managed_deployment: default_managed_deployment(),
            set_parameters_file: None,
            additional_arguments: None,
            tool: ToolConfig::default(),
        }
    }
}

/// Remote publish-profile settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishConfig {
    /// Management host, e.g. `myapp.scm.azurewebsites.net:443`.
    pub url: EnvValue,
    pub username: EnvValue,
    pub password: EnvValue,
}

impl PublishConfig {
    pub fn resolve(&self) -> Result<PublishCredentials> {
        Ok(PublishCredentials {
            publish_url: self.url.resolve()?,
            user_name: self.username.resolve()?,
            password: self.password.resolve()?,
        })
    }
}

/// Where to look for msdeploy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolConfig {
    /// Explicit path to msdeploy.exe.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Directory with one subdirectory per installed version.
    #[serde(default)]
    pub install_root: Option<PathBuf>,
}

impl ToolConfig {
    /// Configured path, then install root, then the search path.
    pub fn locator(&self) -> LocatorChain {
        let mut chain = LocatorChain::new();
        if let Some(path) = &self.path {
            chain = chain.with(ConfiguredPath(path.clone()));
        }
        if let Some(root) = &self.install_root {
            chain = chain.with(InstallRoot(root.clone()));
        }
        chain.with(SearchPath)
    }
}

/// Values given on the command line. `Some`/`true` wins over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub app: Option<String>,
    pub package: Option<String>,
    pub virtual_application: Option<String>,
    pub publish_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub remove_additional_files: bool,
    pub exclude_app_data: bool,
    pub take_app_offline: bool,
    pub no_managed_deployment: bool,
    pub set_parameters_file: Option<String>,
    pub additional_arguments: Option<String>,
    pub msdeploy: Option<PathBuf>,
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like [`Config::discover`], but a missing file means defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Result<Self> {
        if overrides.app.is_some() {
            self.app = overrides.app;
        }
        if overrides.package.is_some() {
            self.package = overrides.package;
        }
        if overrides.virtual_application.is_some() {
            self.virtual_application = overrides.virtual_application;
        }
        if overrides.set_parameters_file.is_some() {
            self.set_parameters_file = overrides.set_parameters_file;
        }
        if overrides.additional_arguments.is_some() {
            self.additional_arguments = overrides.additional_arguments;
        }
        if overrides.msdeploy.is_some() {
            self.tool.path = overrides.msdeploy;
        }

        self.remove_additional_files |= overrides.remove_additional_files;
        self.exclude_app_data |= overrides.exclude_app_data;
        self.take_app_offline |= overrides.take_app_offline;
        if overrides.no_managed_deployment {
            self.use_managed_deployment = false;
        }

        match (overrides.publish_url, overrides.username, overrides.password) {
            (None, None, None) => {}
            (Some(url), Some(username), Some(password)) => {
                self.publish = Some(PublishConfig {
                    url: EnvValue::Literal(url),
                    username: EnvValue::Literal(username),
                    password: EnvValue::Literal(password),
                });
            }
            _ => {
                return Err(Error::InvalidConfig(
                    "--publish-url, --username and --password must be given together".to_string(),
                ));
            }
        }

        Ok(self)
    }

    /// Resolve the package, inspect it, and assemble deployment options.
    pub fn to_options(&self) -> Result<DeploymentOptions> {
        let app = self.app.as_deref().ok_or(Error::MissingInput("app"))?;
        let pattern = self.package.as_deref().ok_or(Error::MissingInput("package"))?;

        let app_name = AppName::new(app)?;
        let package = package::resolve_package(pattern)?;
        let has_parameters_descriptor = inspect_descriptor(&package)?;

        let credentials = self.publish.as_ref().map(PublishConfig::resolve).transpose()?;

        Ok(DeploymentOptions {
            package: package.locator(),
            app_name,
            virtual_application: self.virtual_application.clone().filter(|v| !v.is_empty()),
            credentials,
            remove_additional_files: self.remove_additional_files,
            exclude_app_data: self.exclude_app_data,
            take_app_offline: self.take_app_offline,
            use_managed_deployment: self.use_managed_deployment,
            set_parameters_file: self.set_parameters_file.clone(),
            additional_arguments: self.additional_arguments.clone(),
            folder_deployment: package.is_folder(),
            has_parameters_descriptor,
        })
    }
}

// Only zip packages can carry a parameters descriptor.
fn inspect_descriptor(package: &Package) -> Result<bool> {
    if package.is_folder() || !package.locator().to_ascii_lowercase().ends_with(".zip") {
        return Ok(false);
    }
    Ok(package::has_parameters_descriptor(&package.path)?)
}
