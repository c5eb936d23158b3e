/*!
 * Vocabulary aggregation for uploaded songs.
 *
 * Ingestion tokenizes the lyrics, keeps the first `cap` distinct words in
 * order of first occurrence, attaches a starter translation from the built-in
 * dictionary and counts every occurrence of each kept word into the store.
 * All upserts of one song are applied as a single store command.
 */

use log::{debug, info};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::database::{LanguageRecord, LearningStore, VocabularyUpsert};
use crate::dictionary::starter_translation;
use crate::errors::StoreError;
use crate::text_analysis::{extract_words, word_frequency};

/// Default number of distinct words recorded per song
pub const DEFAULT_INGEST_CAP: usize = 50;

/// Summary of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Distinct candidate words found in the lyrics
    pub distinct_words: usize,
    /// Distinct words written to the store
    pub recorded_words: usize,
    /// Recorded words that were not in the vocabulary before
    pub new_words: usize,
    /// Distinct words dropped by the cap
    pub skipped_words: usize,
    /// Occurrences added across all recorded words
    pub total_occurrences: i64,
}

/// Builds vocabulary entries from song lyrics
pub struct VocabularyAggregator {
    store: Arc<LearningStore>,
    cap: usize,
}

impl VocabularyAggregator {
    pub fn new(store: Arc<LearningStore>, cap: usize) -> Self {
        Self { store, cap }
    }

    /// The distinct-word cap applied per song
    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Compute the upserts for a piece of lyrics without touching the store
    pub fn plan(lyrics: &str, language_code: &str, cap: usize) -> Vec<VocabularyUpsert> {
        let words = extract_words(lyrics);
        let counts = word_frequency(&words);

        let mut seen = HashSet::new();
        words
            .iter()
            .filter(|word| seen.insert(*word))
            .take(cap)
            .map(|word| VocabularyUpsert {
                word: word.clone(),
                translation: starter_translation(word, language_code),
                occurrences: counts.get(word).copied().unwrap_or(1) as i64,
            })
            .collect()
    }

    /// Store a new song and its vocabulary as a single command
    pub fn add_song(
        &self,
        title: &str,
        artist: &str,
        language: &LanguageRecord,
        lyrics: &str,
    ) -> Result<(i64, IngestReport), StoreError> {
        let entries = Self::plan(lyrics, &language.code, self.cap);
        let (song_id, new_words) =
            self.store
                .add_song_with_vocabulary(title, artist, language.id, lyrics, &entries)?;

        let report = self.report(lyrics, &entries, new_words);
        self.log_report(song_id, language, &report);
        Ok((song_id, report))
    }

    /// Record the vocabulary of a song that is already in the store
    pub fn ingest(
        &self,
        lyrics: &str,
        language: &LanguageRecord,
        song_id: i64,
    ) -> Result<IngestReport, StoreError> {
        let entries = Self::plan(lyrics, &language.code, self.cap);
        let new_words = self
            .store
            .upsert_vocabulary_batch(language.id, Some(song_id), &entries)?;

        let report = self.report(lyrics, &entries, new_words);
        self.log_report(song_id, language, &report);
        Ok(report)
    }

    fn report(&self, lyrics: &str, entries: &[VocabularyUpsert], new_words: usize) -> IngestReport {
        let distinct_words = extract_words(lyrics)
            .into_iter()
            .collect::<HashSet<_>>()
            .len();

        IngestReport {
            distinct_words,
            recorded_words: entries.len(),
            new_words,
            skipped_words: distinct_words.saturating_sub(entries.len()),
            total_occurrences: entries.iter().map(|e| e.occurrences).sum(),
        }
    }

    fn log_report(&self, song_id: i64, language: &LanguageRecord, report: &IngestReport) {
        if report.skipped_words > 0 {
            debug!(
                "Song {}: {} distinct words beyond the cap of {} were not recorded",
                song_id, report.skipped_words, self.cap
            );
        }
        info!(
            "Ingested song {} ({}): {} words recorded, {} new",
            song_id, language.code, report.recorded_words, report.new_words
        );
    }
}
