//! Integration tests for driver-config

use driver_config::{ConfigError, DriverConfig, parser, resolver::ResolutionContext};
use std::path::PathBuf;

#[test]
fn test_full_config_parsing() {
    let yaml = r#"
machine_name: "web-1"
config_dir: "/srv/terraform/web"
executable: "/opt/terraform/bin/terraform"
variables_file: "extra-vars.json"
variables:
  - "region=us-east-1"
  - "image=ubuntu-22.04"
refresh_after_apply: true
validate: false
ssh:
  user: "ubuntu"
  port: 2222
client_ip: "203.0.113.7"
"#;

    let config = parser::parse_str_with(yaml, &ResolutionContext::empty()).unwrap();

    assert_eq!(config.machine_name, "web-1");
    assert_eq!(config.config_dir, PathBuf::from("/srv/terraform/web"));
    assert_eq!(
        config.executable,
        Some(PathBuf::from("/opt/terraform/bin/terraform"))
    );
    assert_eq!(config.variables_file, Some(PathBuf::from("extra-vars.json")));
    assert_eq!(config.variables, ["region=us-east-1", "image=ubuntu-22.04"]);
    assert!(config.refresh_after_apply);
    assert!(!config.validate);
    assert_eq!(config.ssh.user, "ubuntu");
    assert_eq!(config.ssh.port, 2222);
    assert_eq!(config.client_ip.as_deref(), Some("203.0.113.7"));
}

#[test]
fn test_env_substitution() {
    let yaml = r#"
machine_name: "${MACHINE:-default-machine}"
config_dir: "${TF_HOME}/config"
"#;

    let mut context = ResolutionContext::empty();
    context.set_env("TF_HOME", "/home/ops/tf");

    let config = parser::parse_str_with(yaml, &context).unwrap();

    assert_eq!(config.machine_name, "default-machine");
    assert_eq!(config.config_dir, PathBuf::from("/home/ops/tf/config"));
}

#[test]
fn test_missing_env_var_is_reported() {
    let yaml = "machine_name: m\nconfig_dir: ${NOT_SET_ANYWHERE}\n";

    let err = parser::parse_str_with(yaml, &ResolutionContext::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::EnvVarNotFound(ref name) if name == "NOT_SET_ANYWHERE"));
}

#[test]
fn test_validation_errors() {
    let empty_name = "machine_name: \"\"\nconfig_dir: /srv/tf\n";
    let err = parser::parse_str_with(empty_name, &ResolutionContext::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationError(_)));

    let bad_variable = "machine_name: m\nconfig_dir: /srv/tf\nvariables: [\"novalue\"]\n";
    let err = parser::parse_str_with(bad_variable, &ResolutionContext::empty()).unwrap_err();
    assert!(err.to_string().contains("novalue"));

    let mut config = DriverConfig::new("m", "");
    config.config_dir = PathBuf::new();
    assert!(parser::validate_config(&config).is_err());
}

#[test]
fn test_missing_required_field() {
    let err = parser::parse_str_with("machine_name: m\n", &ResolutionContext::empty()).unwrap_err();
    assert!(matches!(err, ConfigError::YamlError(_)));
}

#[test]
fn test_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("driver.yaml");
    std::fs::write(&path, "machine_name: from-file\nconfig_dir: /srv/tf\n").unwrap();

    let config = parser::parse_file(&path).unwrap();
    assert_eq!(config.machine_name, "from-file");

    let err = parser::parse_file(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}
