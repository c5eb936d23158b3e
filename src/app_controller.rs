use anyhow::{Context, Result};
use log::{debug, info};
use std::sync::Arc;

use crate::app_config::Config;
use crate::database::{
    FileSlot, LanguageRecord, LearningSessionRecord, LearningStore, MemorySlot, ProgressRecord,
    SnapshotSlot, SongRecord, StoreOptions, StoreStats, VocabularyRecord,
};
use crate::errors::StoreError;
use crate::language_utils;
use crate::progress::ProgressTracker;
use crate::translation::{CacheStats, TranslationCache, TranslationResolver, TranslationResult};
use crate::vocabulary::{IngestReport, VocabularyAggregator};

// @module: Application controller for the learning core

/// Entry point for collaborators: one store handle, wired into every component
pub struct Controller {
    // @field: App configuration
    config: Config,
    store: Arc<LearningStore>,
    aggregator: VocabularyAggregator,
    progress: ProgressTracker,
    resolver: TranslationResolver,
}

impl Controller {
    /// Create a controller with a file-backed store and network providers
    pub fn with_config(config: Config) -> Result<Self> {
        let data_dir = config.storage.resolve_data_dir()?;
        debug!("Using data directory {:?}", data_dir);

        let resolver = TranslationResolver::from_config(&config.translation);
        Ok(Self::with_parts(config, Arc::new(FileSlot::new(data_dir)), resolver))
    }

    /// Create a controller over an in-memory slot and an empty provider chain
    pub fn new_for_test() -> Self {
        let config = Config::default();
        let resolver = TranslationResolver::new(
            config.translation.target_language.clone(),
            TranslationCache::new(config.translation.cache_capacity),
        );
        Self::with_parts(config, Arc::new(MemorySlot::new()), resolver)
    }

    // @method: Assemble a controller from explicit parts
    pub fn with_parts(
        config: Config,
        slot: Arc<dyn SnapshotSlot>,
        resolver: TranslationResolver,
    ) -> Self {
        let options = StoreOptions {
            snapshot_key: config.storage.snapshot_key.clone(),
            seed_sample_songs: config.storage.seed_sample_songs,
        };
        let store = Arc::new(LearningStore::new(slot, options));

        Self {
            aggregator: VocabularyAggregator::new(store.clone(), config.vocabulary.ingest_cap),
            progress: ProgressTracker::new(store.clone()),
            store,
            resolver,
            config,
        }
    }

    /// Restore or create the learning database
    pub fn initialize(&self) -> Result<(), StoreError> {
        self.store.initialize()?;
        info!("Learning store ready");
        Ok(())
    }

    /// Check if the store has been initialized and not closed
    pub fn is_initialized(&self) -> bool {
        self.store.is_initialized()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &Arc<LearningStore> {
        &self.store
    }

    pub fn resolver(&self) -> &TranslationResolver {
        &self.resolver
    }

    // =========================================================================
    // Languages and songs
    // =========================================================================

    pub fn list_languages(&self) -> Result<Vec<LanguageRecord>, StoreError> {
        self.store.list_languages()
    }

    /// Find a seeded language by code; 3-letter ISO codes are accepted too
    pub fn language_by_code(&self, code: &str) -> Result<LanguageRecord, StoreError> {
        if let Some(language) = self.store.language_by_code(code)? {
            return Ok(language);
        }

        let short = language_utils::normalize_to_part1(code)
            .map_err(|_| StoreError::UnknownLanguageCode(code.to_string()))?;
        self.store
            .language_by_code(&short)?
            .ok_or_else(|| StoreError::UnknownLanguageCode(code.to_string()))
    }

    /// Upload a song; its vocabulary is ingested in the same command
    pub fn add_song(
        &self,
        title: &str,
        artist: &str,
        language_id: i64,
        lyrics: &str,
    ) -> Result<i64, StoreError> {
        self.add_song_with_report(title, artist, language_id, lyrics)
            .map(|(song_id, _)| song_id)
    }

    /// Upload a song and report what the vocabulary ingestion did
    pub fn add_song_with_report(
        &self,
        title: &str,
        artist: &str,
        language_id: i64,
        lyrics: &str,
    ) -> Result<(i64, IngestReport), StoreError> {
        let language = self
            .store
            .language(language_id)?
            .ok_or(StoreError::UnknownLanguage(language_id))?;
        self.aggregator.add_song(title, artist, &language, lyrics)
    }

    pub fn get_song(&self, song_id: i64) -> Result<Option<SongRecord>, StoreError> {
        self.store.get_song(song_id)
    }

    /// Songs of a language, newest first
    pub fn songs_for(&self, language_id: i64) -> Result<Vec<SongRecord>, StoreError> {
        self.store.songs_by_language(language_id)
    }

    /// Vocabulary of a language, most frequent first
    pub fn vocabulary_for(&self, language_id: i64) -> Result<Vec<VocabularyRecord>, StoreError> {
        self.store.vocabulary_by_language(language_id)
    }

    // =========================================================================
    // Progress
    // =========================================================================

    pub fn record_progress(
        &self,
        song_id: i64,
        line: i64,
        completed: bool,
    ) -> Result<ProgressRecord, StoreError> {
        self.progress.record(song_id, line, completed)
    }

    pub fn go_to_line(&self, song_id: i64, line: i64) -> Result<ProgressRecord, StoreError> {
        self.progress.go_to_line(song_id, line)
    }

    pub fn complete_line(&self, song_id: i64, line: i64) -> Result<ProgressRecord, StoreError> {
        self.progress.complete_line(song_id, line)
    }

    pub fn progress_for(&self, song_id: i64) -> Result<Option<ProgressRecord>, StoreError> {
        self.progress.progress_for(song_id)
    }

    /// Log a finished study session
    pub fn record_learning_session(
        &self,
        song_id: i64,
        vocabulary_learned: &[String],
        duration_minutes: i64,
    ) -> Result<i64, StoreError> {
        self.store
            .record_learning_session(song_id, vocabulary_learned, duration_minutes)
    }

    pub fn learning_sessions_for(
        &self,
        song_id: i64,
    ) -> Result<Vec<LearningSessionRecord>, StoreError> {
        self.store.learning_sessions_for_song(song_id)
    }

    // =========================================================================
    // Translation
    // =========================================================================

    /// Translate a word or line; failure shows up as low confidence
    pub async fn translate(&self, text: &str, source_language_code: &str) -> TranslationResult {
        self.resolver.translate(text, source_language_code).await
    }

    /// Translate a vocabulary entry and back-fill its stored translation
    ///
    /// Only provider results are written back; the untranslated marker is not.
    pub async fn translate_vocabulary(
        &self,
        entry: &VocabularyRecord,
        source_language_code: &str,
    ) -> Result<TranslationResult, StoreError> {
        let result = self.translate(&entry.word, source_language_code).await;
        if result.is_translated() && result.text != entry.translation {
            self.store.set_vocabulary_translation(entry.id, &result.text)?;
        }
        Ok(result)
    }

    // =========================================================================
    // Housekeeping
    // =========================================================================

    pub fn stats(&self) -> Result<StoreStats, StoreError> {
        self.store.stats()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.resolver.cache().stats()
    }

    /// Save a final snapshot and release the store
    pub fn close(&self) -> Result<()> {
        self.store.close().context("Failed to close learning store")
    }
}
