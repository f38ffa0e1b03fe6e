// ABOUTME: Integration tests for msdeploy command construction.
// ABOUTME: Checks clause selection, ordering, and flag gating.

use webdeploy::msdeploy::{DeploymentOptions, PublishCredentials, build_command, split_args};
use webdeploy::types::AppName;

fn options(package: &str) -> DeploymentOptions {
    DeploymentOptions::new(package, AppName::new("myapp").unwrap())
}

fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{needle:?} not found in {haystack:?}"))
}

#[test]
fn identical_options_build_identical_commands() {
    let mut opts = options("site.zip");
    opts.take_app_offline = true;
    opts.credentials = Some(PublishCredentials {
        publish_url: "myapp.scm.example.net:443".to_string(),
        user_name: "$myapp".to_string(),
        password: "secret".to_string(),
    });

    assert_eq!(build_command(&opts), build_command(&opts.clone()));
}

#[test]
fn folder_deployment_uses_iis_app_pair() {
    let mut opts = options("/build/site");
    opts.folder_deployment = true;
    let cmd = build_command(&opts);

    assert!(cmd.as_str().contains("-source:IisApp=\"'/build/site'\""));
    assert!(cmd.as_str().contains("-dest:iisApp=\"'myapp'\""));
    assert!(!cmd.as_str().contains("contentPath"));
    assert!(!cmd.as_str().contains("-source:package"));
}

#[test]
fn folder_deployment_with_virtual_application() {
    let mut opts = options("/build/site");
    opts.folder_deployment = true;
    opts.virtual_application = Some("api".to_string());

    assert!(
        build_command(&opts)
            .as_str()
            .contains("-dest:iisApp=\"'myapp/api'\"")
    );
}

#[test]
fn war_archive_targets_webapps_directory() {
    let cmd = build_command(&options("/out/target/shop.war"));

    assert!(cmd.as_str().contains("-source:contentPath=\"'/out/target/shop.war'\""));
    assert!(cmd.as_str().contains("-dest:contentPath=\"'/site/webapps/shop.war'\""));
}

#[test]
fn war_archive_with_virtual_application_and_upper_case_ext() {
    let mut opts = options("shop.WAR");
    opts.virtual_application = Some("v2".to_string());

    assert!(
        build_command(&opts)
            .as_str()
            .contains("-dest:contentPath=\"'/site/webapps/shop/v2.WAR'\"")
    );
}

#[test]
fn parameterized_package_uses_auto_destination_and_set_param() {
    let mut opts = options("site.zip");
    opts.has_parameters_descriptor = true;
    opts.virtual_application = Some("api".to_string());
    let cmd = build_command(&opts);

    assert!(cmd.as_str().contains(" -dest:auto"));
    assert!(!cmd.as_str().contains("-dest:contentPath"));
    assert!(cmd.as_str().contains(
        "-setParam:name=\"'IIS Web Application Name'\",value=\"'myapp/api'\""
    ));
}

#[test]
fn credentials_extend_destination_clause() {
    let mut opts = options("site.zip");
    opts.credentials = Some(PublishCredentials {
        publish_url: "myapp.scm.example.net:443".to_string(),
        user_name: "$myapp".to_string(),
        password: "p@ss word".to_string(),
    });
    let cmd = build_command(&opts);

    assert!(cmd.as_str().contains(
        "-dest:contentPath=\"'myapp'\",ComputerName=\"'https://myapp.scm.example.net:443/msdeploy.axd?site=myapp'\",UserName=\"'$myapp'\",Password=\"'p@ss word'\",AuthType=\"'Basic'\""
    ));

    let args = cmd.args();
    assert!(args.iter().any(|a| a.contains("Password='p@ss word'")));
}

#[test]
fn remove_additional_files_requires_managed_deployment() {
    let mut opts = options("site.zip");
    opts.remove_additional_files = true;
    opts.use_managed_deployment = false;
    assert!(build_command(&opts).as_str().ends_with(" -enableRule:DoNotDeleteRule"));

    opts.use_managed_deployment = true;
    assert!(!build_command(&opts).as_str().contains("DoNotDeleteRule"));
}

#[test]
fn additional_arguments_are_passed_verbatim() {
    let mut opts = options("site.zip");
    opts.additional_arguments = Some("-retryAttempts:6 -retryInterval:10000".to_string());
    let cmd = build_command(&opts);

    let extra = position(cmd.as_str(), "-retryAttempts:6 -retryInterval:10000");
    assert!(extra < position(cmd.as_str(), "-enableRule:DoNotDeleteRule"));
    assert!(cmd.args().contains(&"-retryInterval:10000".to_string()));
}

#[test]
fn archive_with_app_offline_scenario_order() {
    let mut opts = options("site.zip");
    opts.take_app_offline = true;
    let cmd = build_command(&opts);
    let s = cmd.as_str();

    let verb = position(s, "-verb:sync");
    let source = position(s, "-source:package=\"'site.zip'\"");
    let dest = position(s, "-dest:contentPath=\"'myapp'\"");
    let offline = position(s, "-enableRule:AppOffline");
    let no_delete = position(s, "-enableRule:DoNotDeleteRule");

    assert!(verb < source && source < dest && dest < offline && offline < no_delete);
    assert_eq!(
        split_args(s),
        vec![
            "-verb:sync",
            "-source:package='site.zip'",
            "-dest:contentPath='myapp'",
            "-enableRule:AppOffline",
            "-enableRule:DoNotDeleteRule",
        ]
    );
}

#[test]
fn managed_deployment_clauses_follow_app_offline() {
    let mut opts = options("site.zip");
    opts.take_app_offline = true;
    opts.exclude_app_data = true;
    opts.set_parameters_file = Some("SetParameters.xml".to_string());
    let cmd = build_command(&opts);
    let s = cmd.as_str();

    let offline = position(s, "-enableRule:AppOffline");
    let param_file = position(s, "-setParamFile=SetParameters.xml");
    let skip = position(s, "-skip:Directory=App_Data");
    assert!(offline < param_file && param_file < skip);
}
