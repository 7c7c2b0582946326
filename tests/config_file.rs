// tests/config_file.rs
//
// Loading config files from disk.
//
use std::fs;
use std::path::Path;

use tempfile::TempDir;

use blind_scrape::config::Config;
use blind_scrape::error::ConfigError;
use blind_scrape::tier::TierKind;

#[test]
fn shipped_sample_config_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config/config.json");
    let cfg = Config::load(&path).unwrap();

    let enabled: Vec<&str> = cfg.output_file_headers.enabled().collect();
    assert_eq!(enabled.first(), Some(&"tier"));
    assert_eq!(enabled.last(), Some(&"last_updated"));
    assert!(!enabled.contains(&"url"));
    assert_eq!(cfg.tier_calculator, TierKind::Simple);
    assert_eq!(cfg.max_age, 30);
}

#[test]
fn missing_config_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load(&dir.path().join("config.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn wrong_types_are_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "INPUT_FILE_PATH": "in", "OUTPUT_FILE_PATH": "out", "DATABASE_FILE_PATH": "db",
             "OUTPUT_FILE_HEADERS": { "tier": "yes" }, "TIME_DELAY": 1, "MAX_REQUESTS": 1,
             "MAX_AGE": 1, "HTTP_HEADERS": {} }"#,
    )
    .unwrap();
    assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
}

#[test]
fn negative_request_budget_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "INPUT_FILE_PATH": "in", "OUTPUT_FILE_PATH": "out", "DATABASE_FILE_PATH": "db",
             "OUTPUT_FILE_HEADERS": {}, "TIME_DELAY": 0, "MAX_REQUESTS": -1,
             "MAX_AGE": 1, "HTTP_HEADERS": {} }"#,
    )
    .unwrap();

    let cfg = Config::load(&path).unwrap();
    assert_eq!(cfg.max_requests, -1);
    assert!(cfg.output_file_headers.is_empty());
}
