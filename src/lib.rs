/*!
 * # Songlingo - learn a language from song lyrics
 *
 * A Rust library that turns uploaded foreign-language lyrics into a study
 * vocabulary, tracks reading progress per song and translates words and
 * lines through a chain of lookup services.
 *
 * ## Features
 *
 * - Tokenize lyrics into candidate vocabulary words
 * - Count word frequencies per language across every uploaded song
 * - Record per-song reading positions and completion
 * - Translate words and lines with dictionary and machine-translation
 *   providers, falling back to an untranslated marker instead of failing
 * - Persist everything as a single snapshot blob, saved on every change
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `text_analysis`: Lyrics tokenizer
 * - `dictionary`: Built-in starter glossaries
 * - `database`: Persistent learning-data store:
 *   - `database::repository`: the `LearningStore` handle
 *   - `database::snapshot`: durable key-value slots for snapshots
 * - `vocabulary`: Vocabulary aggregation for uploaded songs
 * - `progress`: Per-song reading progress
 * - `translation`: Translation resolution:
 *   - `translation::resolver`: provider chain and routing
 *   - `translation::cache`: bounded translation cache
 *   - `translation::cleaning`: provider output clean-up
 * - `providers`: Lookup service clients:
 *   - `providers::wiktionary`: Wiktionary definitions
 *   - `providers::mymemory`: MyMemory machine translation
 * - `app_controller`: Facade used by front ends
 * - `language_utils`: ISO language code utilities
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod database;
pub mod dictionary;
pub mod errors;
pub mod language_utils;
pub mod progress;
pub mod providers;
pub mod text_analysis;
pub mod translation;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use database::{LearningStore, StoreOptions};
pub use errors::{AppError, ProviderError, StoreError};
pub use text_analysis::{extract_words, unique_words};
pub use translation::{TranslationResolver, TranslationResult};
