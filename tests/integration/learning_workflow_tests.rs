/*!
 * Integration tests for the song upload, vocabulary and progress workflows
 */

use anyhow::Result;

use songlingo::errors::StoreError;

use crate::common;

/// Test the vocabulary produced by one upload
#[test]
fn test_addSong_withRepeatedWords_shouldCountOccurrences() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;

    controller.add_song("Amor", "Banda", spanish.id, common::LOVE_LYRICS)?;

    let vocabulary = controller.vocabulary_for(spanish.id)?;
    let counts: Vec<(&str, i64)> = vocabulary
        .iter()
        .map(|entry| (entry.word.as_str(), entry.frequency_count))
        .collect();
    assert_eq!(counts, vec![("love", 3), ("heart", 2), ("hope", 1)]);
    Ok(())
}

/// Test that a second upload adds to existing counts without duplicating words
#[test]
fn test_addSong_twice_shouldAccumulateFrequencies() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;

    let first = controller.add_song("Uno", "A", spanish.id, "amor amor noche")?;
    let (_, report) =
        controller.add_song_with_report("Dos", "B", spanish.id, "amor corazón")?;

    assert_eq!(report.new_words, 1);
    assert_eq!(report.recorded_words, 2);

    let vocabulary = controller.vocabulary_for(spanish.id)?;
    assert_eq!(vocabulary.len(), 3);

    let amor = vocabulary.iter().find(|v| v.word == "amor").expect("amor recorded");
    assert_eq!(amor.frequency_count, 3);
    assert_eq!(amor.first_song_id, Some(first));
    assert_eq!(amor.translation, "love");
    Ok(())
}

/// Test that vocabulary is kept per language
#[test]
fn test_vocabulary_shouldBeSeparatedByLanguage() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let portuguese = common::language(&controller, "pt")?;

    controller.add_song("Uno", "A", spanish.id, "amor")?;
    controller.add_song("Dois", "B", portuguese.id, "amor")?;

    assert_eq!(controller.vocabulary_for(spanish.id)?[0].frequency_count, 1);
    assert_eq!(controller.vocabulary_for(portuguese.id)?[0].frequency_count, 1);
    Ok(())
}

/// Test that songs are listed newest first
#[test]
fn test_songsFor_shouldListNewestFirst() -> Result<()> {
    let controller = common::test_controller()?;
    let korean = common::language(&controller, "ko")?;

    let first = controller.add_song("First", "A", korean.id, "사랑")?;
    let second = controller.add_song("Second", "B", korean.id, "마음")?;

    let ids: Vec<i64> = controller.songs_for(korean.id)?.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![second, first]);
    Ok(())
}

/// Test that an unknown language id is rejected without side effects
#[test]
fn test_addSong_withUnknownLanguage_shouldBeCallerMisuse() -> Result<()> {
    let controller = common::test_controller()?;
    let before = controller.stats()?;

    let error = controller.add_song("T", "A", 9999, "hola").unwrap_err();
    assert!(matches!(error, StoreError::UnknownLanguage(9999)));
    assert!(error.is_caller_misuse());
    assert_eq!(controller.stats()?.song_count, before.song_count);
    Ok(())
}

/// Test that recording progress twice keeps one record and counts sessions
#[test]
fn test_recordProgress_twice_shouldKeepOneRecord() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let song_id = controller.add_song("Canción", "A", spanish.id, common::SPANISH_LYRICS)?;

    controller.record_progress(song_id, 0, false)?;
    let progress = controller.record_progress(song_id, 2, false)?;

    assert_eq!(progress.current_line, 2);
    assert_eq!(progress.practice_sessions, 2);
    assert_eq!(controller.stats()?.progress_count, 1);
    Ok(())
}

/// Test line navigation through a whole song
#[test]
fn test_completeLine_throughSong_shouldCompleteOnLastLine() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let song_id = controller.add_song("Canción", "A", spanish.id, common::SPANISH_LYRICS)?;

    // Four non-blank lines: indices 0..=3
    let mut progress = controller.complete_line(song_id, 0)?;
    assert_eq!(progress.current_line, 1);
    assert!(!progress.completed);

    progress = controller.complete_line(song_id, progress.current_line)?;
    progress = controller.complete_line(song_id, progress.current_line)?;
    assert_eq!(progress.current_line, 3);
    assert!(progress.completed);

    progress = controller.complete_line(song_id, 3)?;
    assert_eq!(progress.current_line, 3);
    assert!(progress.completed);
    assert_eq!(progress.practice_sessions, 4);
    Ok(())
}

/// Test that navigation clamps and never completes a song
#[test]
fn test_goToLine_outOfRange_shouldClamp() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let song_id = controller.add_song("Canción", "A", spanish.id, common::SPANISH_LYRICS)?;

    let progress = controller.go_to_line(song_id, 42)?;
    assert_eq!(progress.current_line, 3);
    assert!(!progress.completed);

    let progress = controller.go_to_line(song_id, -5)?;
    assert_eq!(progress.current_line, 0);
    Ok(())
}

/// Test progress on a song that does not exist
#[test]
fn test_recordProgress_withUnknownSong_shouldFail() -> Result<()> {
    let controller = common::test_controller()?;

    assert!(matches!(
        controller.record_progress(404, 0, false),
        Err(StoreError::UnknownSong(404))
    ));
    assert!(controller.progress_for(404)?.is_none());
    Ok(())
}

/// Test learning session logging
#[test]
fn test_recordLearningSession_shouldBeListedForSong() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let song_id = controller.add_song("Canción", "A", spanish.id, common::SPANISH_LYRICS)?;

    let words = vec!["amor".to_string(), "noche".to_string()];
    controller.record_learning_session(song_id, &words, 15)?;

    let sessions = controller.learning_sessions_for(song_id)?;
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].vocabulary_learned, "amor,noche");
    assert_eq!(sessions[0].duration_minutes, 15);
    Ok(())
}

/// Test the literal ingestion scenario on plain lyrics
#[test]
fn test_addSong_withPlainRepeatedWords_shouldOrderByFrequency() -> Result<()> {
    let controller = common::test_controller()?;
    let french = common::language(&controller, "fr")?;

    controller.add_song("Song", "Artist", french.id, "love love love heart heart hope")?;

    let words: Vec<(String, i64)> = controller
        .vocabulary_for(french.id)?
        .into_iter()
        .map(|entry| (entry.word, entry.frequency_count))
        .collect();
    assert_eq!(
        words,
        vec![
            ("love".to_string(), 3),
            ("heart".to_string(), 2),
            ("hope".to_string(), 1)
        ]
    );
    Ok(())
}

/// Test that an explicit completion overwrites the earlier position
#[test]
fn test_recordProgress_thenComplete_shouldOverwriteLineAndFlag() -> Result<()> {
    let controller = common::test_controller()?;
    let spanish = common::language(&controller, "es")?;
    let song_id = controller.add_song("Canción", "A", spanish.id, "uno\ndos\ntres\ncuatro\ncinco")?;

    controller.record_progress(song_id, 2, false)?;
    controller.record_progress(song_id, 4, true)?;

    let progress = controller.progress_for(song_id)?.expect("progress recorded");
    assert_eq!(progress.current_line, 4);
    assert!(progress.completed);
    assert_eq!(progress.practice_sessions, 2);
    Ok(())
}
