use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::database::{DEFAULT_SNAPSHOT_KEY, FileSlot};
use crate::providers::{mymemory, wiktionary};
use crate::translation::cache::DEFAULT_CACHE_CAPACITY;
use crate::vocabulary::DEFAULT_INGEST_CAP;

/// Application configuration, stored as JSON (`conf.json` by default)
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Snapshot storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Vocabulary ingestion settings
    #[serde(default)]
    pub vocabulary: VocabularyConfig,

    /// Translation resolver settings
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Where and how the learning database is saved
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory of the snapshot file; the user data directory when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Key the snapshot is saved under
    #[serde(default = "default_snapshot_key")]
    pub snapshot_key: String,

    /// Insert the sample songs into a brand-new database
    #[serde(default)]
    pub seed_sample_songs: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            snapshot_key: default_snapshot_key(),
            seed_sample_songs: false,
        }
    }
}

impl StorageConfig {
    /// The configured data directory, or the platform default
    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => FileSlot::default_dir().context("Failed to determine data directory"),
        }
    }
}

/// Vocabulary ingestion settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VocabularyConfig {
    /// Distinct words recorded per uploaded song
    #[serde(default = "default_ingest_cap")]
    pub ingest_cap: usize,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            ingest_cap: default_ingest_cap(),
        }
    }
}

/// Settings of one lookup provider
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProviderSettings {
    // @field: Whether the provider takes part in the chain
    #[serde(default = "default_true")]
    pub enabled: bool,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,
}

impl ProviderSettings {
    fn enabled_at(endpoint: &str) -> Self {
        Self {
            enabled: true,
            endpoint: endpoint.to_string(),
        }
    }
}

/// Translation resolver configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Language that words are translated into
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Maximum number of cached translations
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Definition lookup for single words
    #[serde(default = "default_dictionary_provider")]
    pub dictionary: ProviderSettings,

    /// Machine translation for words and lines
    #[serde(default = "default_statistical_provider")]
    pub statistical: ProviderSettings,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_language: default_target_language(),
            cache_capacity: default_cache_capacity(),
            timeout_secs: default_timeout_secs(),
            dictionary: default_dictionary_provider(),
            statistical: default_statistical_provider(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_snapshot_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}

fn default_ingest_cap() -> usize {
    DEFAULT_INGEST_CAP
}

fn default_target_language() -> String {
    "en".to_string()
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

fn default_dictionary_provider() -> ProviderSettings {
    ProviderSettings::enabled_at(wiktionary::DEFAULT_ENDPOINT)
}

fn default_statistical_provider() -> ProviderSettings {
    ProviderSettings::enabled_at(mymemory::DEFAULT_ENDPOINT)
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.translation.target_language)
            .context("Invalid translation target language")?;

        if self.storage.snapshot_key.trim().is_empty() {
            return Err(anyhow!("Snapshot key must not be empty"));
        }
        if self.vocabulary.ingest_cap == 0 {
            return Err(anyhow!("Vocabulary ingest cap must be at least 1"));
        }
        if self.translation.cache_capacity == 0 {
            return Err(anyhow!("Translation cache capacity must be at least 1"));
        }
        if self.translation.timeout_secs == 0 {
            return Err(anyhow!("Translation timeout must be at least 1 second"));
        }

        for (name, provider) in [
            ("dictionary", &self.translation.dictionary),
            ("statistical", &self.translation.statistical),
        ] {
            if provider.enabled && provider.endpoint.trim().is_empty() {
                return Err(anyhow!("Endpoint is required for the enabled {} provider", name));
            }
        }

        Ok(())
    }

    /// Read a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Read a configuration file, writing the defaults first when it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        log::warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let config_json =
            serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }
}
