// ABOUTME: Config scaffolding for new projects.
// ABOUTME: Creates webdeploy.yml template files.

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::AppName;

use super::CONFIG_FILENAME;

pub fn init_config(
    dir: &Path,
    app: Option<&str>,
    package: Option<&str>,
    force: bool,
) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let app = AppName::new(app.unwrap_or("my-app"))?;
    let package = package.unwrap_or("publish/*.zip");

    std::fs::write(&config_path, generate_template_yaml(&app, package))?;

    Ok(())
}

fn generate_template_yaml(app: &AppName, package: &str) -> String {
    format!(
        r#"app: {app}
package: "{package}"
# virtual_application: api

# Remote publish profile. Omit for a local IIS deployment.
# publish:
#   url: {app}.scm.azurewebsites.net:443
#   username: {{ env: WEBDEPLOY_USERNAME }}
#   password: {{ env: WEBDEPLOY_PASSWORD }}

take_app_offline: false
exclude_app_data: false
# Only honored when use_managed_deployment is true.
remove_additional_files: false
use_managed_deployment: true

# set_parameters_file: SetParameters.xml
# additional_arguments: "-retryAttempts:6"

# tool:
#   path: C:\Program Files\IIS\Microsoft Web Deploy V3\msdeploy.exe
"#
    )
}
