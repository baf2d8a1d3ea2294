use std::fs;

use chk_checkers::{load_config, CheckError, RegistryConfig};
use tempfile::tempdir;

#[test]
fn empty_document_uses_defaults() -> Result<(), CheckError> {
    let config = RegistryConfig::from_toml_str("")?;
    assert_eq!(config, RegistryConfig::default());
    assert_eq!(config.time_equals_tolerance_us, 1);
    assert_eq!(
        config.aliases.get("CloseTo").map(String::as_str),
        Some("EqualsWithTolerance")
    );
    assert!(config.disabled.is_empty());
    Ok(())
}

#[test]
fn malformed_documents_are_config_errors() {
    match RegistryConfig::from_toml_str("time_equals_tolerance_us = \"soon\"") {
        Err(CheckError::Config(info)) => assert_eq!(info.code, "config-parse"),
        other => panic!("expected config error, got {other:?}"),
    }
}

#[test]
fn load_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("checkers.toml");
    fs::write(&path, "disabled = [\"SamePath\"]\n")?;
    let config = load_config(&path)?;
    assert_eq!(config.disabled, vec!["SamePath".to_string()]);
    assert_eq!(config.time_equals_tolerance_us, 1);
    Ok(())
}

#[test]
fn missing_file_names_the_path() -> std::io::Result<()> {
    let dir = tempdir()?;
    let path = dir.path().join("absent.toml");
    match load_config(&path) {
        Err(CheckError::Config(info)) => {
            assert_eq!(info.code, "config-read");
            assert_eq!(
                info.context.get("path").map(String::as_str),
                Some(path.display().to_string().as_str())
            );
        }
        other => panic!("expected config error, got {other:?}"),
    }
    Ok(())
}

#[test]
fn toml_round_trip() -> Result<(), CheckError> {
    let mut config = RegistryConfig::default();
    config.time_equals_tolerance_us = 250;
    config.disabled.push("IsSymlink".to_string());
    let text = config.to_toml_string()?;
    assert_eq!(RegistryConfig::from_toml_str(&text)?, config);
    Ok(())
}

#[test]
fn oversized_tolerance_is_rejected() {
    let config = RegistryConfig {
        time_equals_tolerance_us: u64::MAX,
        ..RegistryConfig::default()
    };
    match config.time_equals_tolerance() {
        Err(CheckError::Config(info)) => assert_eq!(info.code, "config-tolerance"),
        other => panic!("expected config error, got {other:?}"),
    }
}
