/*!
 * Tests for application configuration
 */

use anyhow::Result;
use songlingo::app_config::{Config, LogLevel};
use songlingo::database::DEFAULT_SNAPSHOT_KEY;
use songlingo::vocabulary::DEFAULT_INGEST_CAP;

use crate::common;

#[test]
fn test_default_config_shouldBeValid() {
    let config = Config::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.storage.snapshot_key, DEFAULT_SNAPSHOT_KEY);
    assert_eq!(config.vocabulary.ingest_cap, DEFAULT_INGEST_CAP);
    assert_eq!(config.translation.target_language, "en");
    assert!(config.translation.dictionary.enabled);
    assert!(config.translation.statistical.enabled);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.translation.target_language = "qqq".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.vocabulary.ingest_cap = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.cache_capacity = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.storage.snapshot_key = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.translation.statistical.endpoint = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_withDisabledProviderWithoutEndpoint_shouldSucceed() {
    let mut config = Config::default();
    config.translation.dictionary.enabled = false;
    config.translation.dictionary.endpoint = String::new();
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_json_shouldFillDefaults() -> Result<()> {
    let json = r#"{
        "vocabulary": { "ingest_cap": 10 },
        "translation": { "target_language": "es" },
        "log_level": "debug"
    }"#;

    let config: Config = serde_json::from_str(json)?;
    assert_eq!(config.vocabulary.ingest_cap, 10);
    assert_eq!(config.translation.target_language, "es");
    assert_eq!(config.translation.timeout_secs, 10);
    assert_eq!(config.storage.snapshot_key, DEFAULT_SNAPSHOT_KEY);
    assert_eq!(config.log_level, LogLevel::Debug);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Debug);
    Ok(())
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let created = Config::load_or_create(&path)?;
    assert!(path.exists());

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.storage.snapshot_key, created.storage.snapshot_key);
    assert_eq!(loaded.translation.cache_capacity, created.translation.cache_capacity);
    Ok(())
}

#[test]
fn test_load_withMalformedJson_shouldFail() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");
    std::fs::write(&path, "{ not json")?;

    assert!(Config::load(&path).is_err());
    Ok(())
}

#[test]
fn test_save_thenLoad_shouldKeepCustomValues() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let path = dir.path().join("conf.json");

    let mut config = Config::default();
    config.storage.data_dir = Some(dir.path().join("data"));
    config.storage.seed_sample_songs = true;
    config.save(&path)?;

    let loaded = Config::load(&path)?;
    assert_eq!(loaded.storage.data_dir, Some(dir.path().join("data")));
    assert!(loaded.storage.seed_sample_songs);
    assert_eq!(loaded.storage.resolve_data_dir()?, dir.path().join("data"));
    Ok(())
}
