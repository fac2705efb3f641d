//! Driver workflow against a stand-in `terraform` script

#![cfg(unix)]

use driver_config::DriverConfig;
use serde_json::{Value, json};
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use terraform_driver::Driver;

/// Records each verb in `calls` and prints `outputs.json` for `output`.
fn install_fake_terraform(dir: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
echo "$*" >> calls
case "$1" in
  output)
    if [ -f outputs.json ]; then cat outputs.json; else echo '{}'; fi
    ;;
  validate)
    echo "Success! The configuration is valid."
    ;;
esac
"#;
    let path = dir.join("terraform");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

fn calls(config_dir: &Path) -> Vec<String> {
    std::fs::read_to_string(config_dir.join("calls"))
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn write_outputs(config_dir: &Path, outputs: Value) {
    std::fs::write(config_dir.join("outputs.json"), outputs.to_string()).unwrap();
}

struct Fixture {
    _bin: tempfile::TempDir,
    config_dir: tempfile::TempDir,
    config: DriverConfig,
}

fn fixture() -> Fixture {
    let bin = tempfile::tempdir().unwrap();
    let config_dir = tempfile::tempdir().unwrap();
    let mut config = DriverConfig::new("web-1", config_dir.path());
    config.executable = Some(install_fake_terraform(bin.path()));
    Fixture {
        _bin: bin,
        config_dir,
        config,
    }
}

#[smol_potat::test]
async fn test_create_records_machine_address() {
    let fx = fixture();
    write_outputs(
        fx.config_dir.path(),
        json!({
            "dm_machine_ip": {"type": "string", "value": "10.0.0.5", "sensitive": false},
            "dm_ssh_user": {"type": "string", "value": "ubuntu", "sensitive": false}
        }),
    );

    let mut driver = Driver::new(fx.config);
    driver.pre_create_check().await.unwrap();
    driver.create().await.unwrap();

    assert_eq!(driver.ip_address(), Some("10.0.0.5"));
    assert_eq!(driver.ssh_user(), "ubuntu");
    assert_eq!(driver.url().as_deref(), Some("tcp://10.0.0.5:2376"));

    let var_file = format!("-var-file={}", driver.variables_file().display());
    assert_eq!(
        calls(fx.config_dir.path()),
        [
            "get -no-color".to_string(),
            "validate".to_string(),
            format!("apply -input=false -no-color {}", var_file),
            "output -json".to_string(),
        ]
    );
}

#[smol_potat::test]
async fn test_refresh_and_skip_validate() {
    let mut fx = fixture();
    fx.config.validate = false;
    fx.config.refresh_after_apply = true;
    write_outputs(
        fx.config_dir.path(),
        json!({"dm_machine_ip": {"type": "string", "value": "192.0.2.1"}}),
    );

    let mut driver = Driver::new(fx.config);
    driver.pre_create_check().await.unwrap();
    driver.create().await.unwrap();

    let verbs: Vec<String> = calls(fx.config_dir.path())
        .iter()
        .filter_map(|c| c.split_whitespace().next().map(str::to_string))
        .collect();
    assert_eq!(verbs, ["get", "apply", "refresh", "output"]);
    // No dm_ssh_user output, so the configured user stays.
    assert_eq!(driver.ssh_user(), "root");
}

#[smol_potat::test]
async fn test_variable_priority() {
    let mut fx = fixture();
    let config_dir = fx.config_dir.path().to_path_buf();

    std::fs::write(
        config_dir.join("tfvars.json"),
        json!({"region": "primary", "dm_machine_name": "stale", "count": 3}).to_string(),
    )
    .unwrap();

    let extra = config_dir.join("extra.json");
    std::fs::write(&extra, json!({"size": "large", "zone": "a"}).to_string()).unwrap();

    fx.config.variables_file = Some(extra);
    fx.config.variables = vec!["region=inline".to_string(), "size=small".to_string()];
    fx.config.client_ip = Some("203.0.113.7".to_string());

    let mut driver = Driver::new(fx.config);
    driver.pre_create_check().await.unwrap();

    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(config_dir.join("tfvars.json")).unwrap())
            .unwrap();
    assert_eq!(
        written,
        json!({
            "count": "3",
            "dm_client_ip": "203.0.113.7",
            "dm_machine_name": "web-1",
            "dm_ssh_port": "22",
            "dm_ssh_user": "root",
            "region": "primary",
            "size": "small",
            "zone": "a"
        })
    );
}

#[smol_potat::test]
async fn test_missing_machine_ip_output() {
    let fx = fixture();
    write_outputs(
        fx.config_dir.path(),
        json!({"something_else": {"type": "string", "value": "x"}}),
    );

    let mut driver = Driver::new(fx.config);
    driver.pre_create_check().await.unwrap();
    let err = driver.create().await.unwrap_err();

    assert!(err.to_string().contains("dm_machine_ip"));
    assert_eq!(driver.ip_address(), None);
}

#[smol_potat::test]
async fn test_missing_config_dir() {
    let mut fx = fixture();
    fx.config.config_dir = fx.config_dir.path().join("does-not-exist");

    let mut driver = Driver::new(fx.config);
    let err = driver.pre_create_check().await.unwrap_err();

    assert!(err.to_string().contains("does not exist"));
    assert!(calls(fx.config_dir.path()).is_empty());
}

#[smol_potat::test]
async fn test_remove_destroys() {
    let fx = fixture();
    std::fs::write(fx.config_dir.path().join("tfvars.json"), "{}").unwrap();

    let mut driver = Driver::new(fx.config);
    driver.remove().await.unwrap();

    let var_file = format!("-var-file={}", driver.variables_file().display());
    assert_eq!(
        calls(fx.config_dir.path()),
        [format!("destroy -force -input=false -no-color {}", var_file)]
    );
}

#[test]
fn test_terraformer_is_resolved_once() {
    let fx = fixture();
    let executable = fx.config.executable.clone().unwrap();

    let mut driver = Driver::new(fx.config);
    let first = driver
        .resolved_terraformer()
        .unwrap()
        .handle()
        .executable_path()
        .unwrap()
        .to_path_buf();
    assert_eq!(first, executable);

    // A second call reuses the resolution instead of failing as already resolved.
    let again = driver.resolved_terraformer().unwrap();
    assert_eq!(again.handle().executable_path().unwrap(), executable.as_path());
}
