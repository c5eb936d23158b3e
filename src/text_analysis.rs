/*!
 * Lyrics tokenization.
 *
 * Splits raw lyrics into candidate vocabulary words: lower-cased, stripped of
 * everything that is not a letter or whitespace, with one-character tokens and
 * common function words removed. All functions here are pure.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Anything that is neither a Unicode letter nor whitespace
static NON_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\s]").expect("static regex is valid"));

/// Closed list of short function words that are never worth studying
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "a", "an",
        "is", "was", "are", "were", "be", "been", "being", "have", "has", "had", "do", "does",
        "did", "will", "would", "could", "should", "may", "might", "must", "i", "you", "he",
        "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your", "his", "its",
        "our", "their", "mine", "yours", "ours", "this", "that", "these", "those", "here",
        "there", "where", "when", "why", "how", "all", "any", "both", "each", "few", "more",
        "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so",
        "than", "too", "very", "can",
    ]
    .into_iter()
    .collect()
});

/// Whether a word is on the stop-word list
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word.to_lowercase().as_str())
}

/// Extract candidate vocabulary words from text, in order of appearance
///
/// Repeated words are kept, so the result can be fed to [`word_frequency`].
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let letters_only = NON_LETTER.replace_all(&lowered, "");

    letters_only
        .split_whitespace()
        .filter(|word| word.chars().count() > 1)
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Distinct candidate words, in order of first appearance
pub fn unique_words(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_words(text)
        .into_iter()
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

/// Count how often each word occurs
pub fn word_frequency<S: AsRef<str>>(words: &[S]) -> HashMap<String, usize> {
    let mut frequency = HashMap::new();
    for word in words {
        *frequency.entry(word.as_ref().to_string()).or_insert(0) += 1;
    }
    frequency
}
