/*!
 * Translation resolution for words and lyric lines.
 *
 * It is split into several submodules:
 *
 * - `resolver`: the provider chain and routing state machine
 * - `cache`: bounded caching of resolved translations
 * - `cleaning`: clean-up of raw provider output
 */

// Re-export main types for easier usage
pub use self::cache::{CacheStats, TranslationCache};
pub use self::resolver::{InputKind, ResultSource, TranslationResolver, TranslationResult};

// Submodules
pub mod cache;
pub mod cleaning;
pub mod resolver;
