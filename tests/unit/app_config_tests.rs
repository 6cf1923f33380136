/*!
 * Tests for app configuration loading and validation
 */

use crate::common::{create_temp_dir, create_test_file};
use traduki::app_config::{Config, LogLevel};

#[test]
fn test_config_fromFile_shouldLoadCompleteConfig() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(
        &dir.path().to_path_buf(),
        "conf.json",
        r#"{
            "source_language": "de",
            "target_language": "en",
            "provider": {
                "model": "gemini-2.5-pro",
                "api_key": "test-key",
                "timeout_secs": 30,
                "concurrent_requests": 5
            },
            "history": {
                "cross_instance_sync": false,
                "poll_interval_ms": 100
            },
            "log_level": "debug"
        }"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.source_language, "de");
    assert_eq!(config.target_language, "en");
    assert_eq!(config.provider.model, "gemini-2.5-pro");
    assert_eq!(config.provider.api_key, "test-key");
    assert_eq!(config.provider.concurrent_requests, 5);
    assert!(!config.history.cross_instance_sync);
    assert_eq!(config.history.poll_interval_ms, 100);
    assert_eq!(config.log_level, LogLevel::Debug);
}

#[test]
fn test_config_fromFile_withEmptyObject_shouldUseAllDefaults() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "conf.json", "{}").unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.source_language, "en");
    assert_eq!(config.target_language, "ukr");
    assert_eq!(config.provider.model, "gemini-2.5-flash");
    assert!(config.history.database_path.is_none());
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_fromFile_withMalformedJson_shouldFail() {
    let dir = create_temp_dir().unwrap();
    let path = create_test_file(&dir.path().to_path_buf(), "conf.json", "{not json").unwrap();

    assert!(Config::from_file(&path).is_err());
}

#[test]
fn test_config_fromFile_withMissingFile_shouldFail() {
    assert!(Config::from_file("/nonexistent/conf.json").is_err());
}

#[test]
fn test_config_validate_shouldRejectZeroPollInterval() {
    let mut config = Config::default();
    config.history.poll_interval_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_loadOrCreate_shouldWriteReadableDefault() {
    let dir = create_temp_dir().unwrap();
    let path = dir.path().join("fresh.json");

    let created = Config::load_or_create(&path).unwrap();
    let reloaded = Config::from_file(&path).unwrap();

    assert_eq!(created.source_language, reloaded.source_language);
    assert_eq!(created.provider.model, reloaded.provider.model);
}
