/*!
 * Common test utilities for the songlingo test suite
 */

use anyhow::Result;
use std::sync::Arc;
use tempfile::TempDir;

use songlingo::app_config::Config;
use songlingo::app_controller::Controller;
use songlingo::database::{FileSlot, LanguageRecord, LearningStore, MemorySlot, StoreOptions};
use songlingo::providers::mock::MockProvider;
use songlingo::translation::{TranslationCache, TranslationResolver};

/// Lyrics whose vocabulary is love x3, heart x2, hope x1
pub const LOVE_LYRICS: &str = "Love, love, LOVE!\nMy heart, my heart.\nHope";

/// Four non-blank lines of Spanish lyrics
pub const SPANISH_LYRICS: &str = "Hola mi amor\n\nMi corazón canta\nLa noche es larga\nAdiós amor";

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Initialized store over an in-memory slot
pub fn memory_store(slot: &MemorySlot) -> Result<LearningStore> {
    Ok(LearningStore::open(
        Arc::new(slot.clone()),
        StoreOptions::default(),
    )?)
}

/// Initialized store over a file slot in `dir`
pub fn file_store(dir: &TempDir) -> Result<LearningStore> {
    Ok(LearningStore::open(
        Arc::new(FileSlot::new(dir.path())),
        StoreOptions::default(),
    )?)
}

/// Route library logs to the test harness; repeated calls are fine
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Initialized controller without providers
pub fn test_controller() -> Result<Controller> {
    init_test_logging();
    let controller = Controller::new_for_test();
    controller.initialize()?;
    Ok(controller)
}

/// Resolver over the given mock providers, in registration order
pub fn mock_resolver(providers: &[&MockProvider]) -> TranslationResolver {
    let mut resolver = TranslationResolver::new("en", TranslationCache::new(64));
    for provider in providers {
        resolver.add_provider(Arc::new((*provider).clone()));
    }
    resolver
}

/// Initialized in-memory controller over the given mock providers
pub fn controller_with_providers(providers: &[&MockProvider]) -> Result<Controller> {
    init_test_logging();
    let controller = Controller::with_parts(
        Config::default(),
        Arc::new(MemorySlot::new()),
        mock_resolver(providers),
    );
    controller.initialize()?;
    Ok(controller)
}

/// Seeded language by code
pub fn language(controller: &Controller, code: &str) -> Result<LanguageRecord> {
    Ok(controller.language_by_code(code)?)
}
