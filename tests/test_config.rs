use certlint::config::{find_config_file, load_config, load_config_from_dir, ConfigError};
use certlint::{default_registry, Certificate, LintStatus, Runner, RunnerOptions, Source};
use std::fs;
use tempfile::TempDir;

const CONFIG: &str = r#"
enable = ["ALL"]
exclude_sources = ["rfc5280"]
record_not_applicable = false
parallel = true
"#;

#[test]
fn test_find_config_walks_up() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("certlint.toml"), CONFIG).unwrap();

    let nested = root.join("certs").join("issued");
    fs::create_dir_all(&nested).unwrap();

    let found = find_config_file(&nested).unwrap();
    assert_eq!(found, root.join("certlint.toml"));
}

#[test]
fn test_find_config_from_file_path() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("certlint.toml"), CONFIG).unwrap();
    let cert_path = root.join("leaf.json");
    fs::write(&cert_path, "{}").unwrap();

    assert_eq!(find_config_file(&cert_path), Some(root.join("certlint.toml")));
}

#[test]
fn test_load_config_from_dir() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("certlint.toml"), CONFIG).unwrap();

    let config = load_config_from_dir(temp_dir.path()).unwrap().unwrap();
    assert_eq!(config.enable, vec!["ALL"]);
    assert_eq!(config.exclude_sources, vec![Source::Rfc5280]);
    assert!(!config.record_not_applicable);
    assert!(config.parallel);
}

#[test]
fn test_load_config_from_dir_reports_bad_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("certlint.toml"), "enable = 3").unwrap();

    let err = load_config_from_dir(temp_dir.path()).unwrap_err();
    assert!(err.to_string().contains("failed to load configuration"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = load_config(&temp_dir.path().join("certlint.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_config_drives_runner() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("certlint.toml");
    fs::write(&path, CONFIG).unwrap();

    let config = load_config(&path).unwrap();
    let registry = default_registry().unwrap();
    config.validate(&registry).unwrap();

    let runner = Runner::new(RunnerOptions::from_config(&config));
    assert!(runner.options().parallel);

    let rsa = Certificate::from_json(
        r#"{
            "not_before": "2024-01-01T00:00:00Z",
            "not_after": "2025-01-01T00:00:00Z",
            "public_key_algorithm": "rsa",
            "public_key": { "kind": "rsa", "modulus_bits": 3072, "exponent": 65537 }
        }"#,
    )
    .unwrap();
    assert!(runner.run(&rsa, &registry).is_empty());

    let ec = Certificate::from_json(
        r#"{
            "not_before": "2024-01-01T00:00:00Z",
            "not_after": "2025-01-01T00:00:00Z",
            "public_key_algorithm": "ecdsa",
            "public_key": { "kind": "ecdsa", "curve": { "name": "P-224", "bit_size": 224 } }
        }"#,
    )
    .unwrap();
    assert_eq!(
        runner.run(&ec, &registry).get("e_ec_improper_curves").map(|r| r.status),
        Some(LintStatus::Error)
    );
}
