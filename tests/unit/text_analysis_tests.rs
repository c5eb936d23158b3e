/*!
 * Tests for the lyrics tokenizer
 */

use songlingo::text_analysis::{extract_words, is_stop_word, unique_words, word_frequency};

const SAMPLES: &[&str] = &[
    "Love, love, LOVE!\nMy heart, my heart.\nHope",
    "Hola mi amor, mi corazón. ¿Dónde estás?",
    "사랑해 너를 사랑해",
    "It's the end of the world as we know it",
    "  \n\t ",
    "123 456 !!! ...",
    "Ça va? Très bien, merci. Été été ÉTÉ",
];

/// Tokens are lower-cased letters only, longer than one character, never stop words
#[test]
fn test_extractWords_withVariedLyrics_shouldOnlyYieldCleanTokens() {
    for sample in SAMPLES {
        for word in extract_words(sample) {
            assert_eq!(word, word.to_lowercase(), "token '{}' from {:?}", word, sample);
            assert!(word.chars().count() > 1, "token '{}' from {:?}", word, sample);
            assert!(word.chars().all(char::is_alphabetic), "token '{}' from {:?}", word, sample);
            assert!(!is_stop_word(&word), "token '{}' from {:?}", word, sample);
        }
    }
}

#[test]
fn test_uniqueWords_appliedTwice_shouldBeIdempotent() {
    for sample in SAMPLES {
        let once = unique_words(sample);
        let twice = unique_words(&once.join(" "));
        assert_eq!(once, twice, "sample {:?}", sample);
    }
}

#[test]
fn test_uniqueWords_withUpperCasedInput_shouldMatchLowerCased() {
    for sample in SAMPLES {
        assert_eq!(unique_words(&sample.to_uppercase()), unique_words(&sample.to_lowercase()));
    }
}

#[test]
fn test_uniqueWords_shouldKeepFirstOccurrenceOrder() {
    let words = unique_words("hope love hope heart love");
    assert_eq!(words, vec!["hope", "love", "heart"]);
}

#[test]
fn test_extractWords_withNonLatinScripts_shouldKeepLetters() {
    assert_eq!(extract_words("사랑해 너를 사랑해"), vec!["사랑해", "너를", "사랑해"]);
    assert_eq!(extract_words("¿Dónde estás?"), vec!["dónde", "estás"]);
}

#[test]
fn test_extractWords_withOnlyPunctuationAndDigits_shouldBeEmpty() {
    assert!(extract_words("123 456 !!! ...").is_empty());
    assert!(extract_words("").is_empty());
}

#[test]
fn test_wordFrequency_shouldCountEveryOccurrence() {
    let words = extract_words("Love, love, LOVE!\nMy heart, my heart.\nHope");
    let frequency = word_frequency(&words);

    assert_eq!(frequency.len(), 3);
    assert_eq!(frequency["love"], 3);
    assert_eq!(frequency["heart"], 2);
    assert_eq!(frequency["hope"], 1);
}
