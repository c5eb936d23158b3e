/*!
 * Per-song reading progress.
 *
 * A thin layer over the store's progress commands that derives the completion
 * flag from line navigation: moving to a line never marks a song completed,
 * completing a line does so only when the last lyric line is reached.
 */

use log::debug;
use std::sync::Arc;

use crate::database::{LearningStore, ProgressRecord};
use crate::errors::StoreError;

/// Non-blank lyric lines, in order
pub fn lyric_lines(lyrics: &str) -> Vec<&str> {
    lyrics.lines().filter(|line| !line.trim().is_empty()).collect()
}

/// Number of non-blank lyric lines
pub fn line_count(lyrics: &str) -> usize {
    lyrics.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Records reading positions for songs
pub struct ProgressTracker {
    store: Arc<LearningStore>,
}

impl ProgressTracker {
    pub fn new(store: Arc<LearningStore>) -> Self {
        Self { store }
    }

    /// Store a position as given
    pub fn record(
        &self,
        song_id: i64,
        line: i64,
        completed: bool,
    ) -> Result<ProgressRecord, StoreError> {
        self.store.upsert_progress(song_id, line, completed)
    }

    /// Navigate to a line; the line is clamped to the song's range
    pub fn go_to_line(&self, song_id: i64, line: i64) -> Result<ProgressRecord, StoreError> {
        let last = self.last_line_index(song_id)?;
        self.record(song_id, line.clamp(0, last), false)
    }

    /// Finish the current line and advance to the next one
    ///
    /// Reaching the last line marks the song completed. Completing the last
    /// line again keeps it completed.
    pub fn complete_line(
        &self,
        song_id: i64,
        current_line: i64,
    ) -> Result<ProgressRecord, StoreError> {
        let last = self.last_line_index(song_id)?;

        let record = if current_line < last {
            let next = current_line.max(-1) + 1;
            self.record(song_id, next, next == last)?
        } else {
            self.record(song_id, last, true)?
        };

        debug!(
            "Song {} at line {} of {} (completed: {})",
            song_id,
            record.current_line,
            last + 1,
            record.completed
        );
        Ok(record)
    }

    /// Current progress of a song, if any was recorded
    pub fn progress_for(&self, song_id: i64) -> Result<Option<ProgressRecord>, StoreError> {
        self.store.progress_for_song(song_id)
    }

    fn last_line_index(&self, song_id: i64) -> Result<i64, StoreError> {
        let song = self
            .store
            .get_song(song_id)?
            .ok_or(StoreError::UnknownSong(song_id))?;
        Ok(line_count(&song.lyrics).saturating_sub(1) as i64)
    }
}
