/*!
 * Translation resolution through the provider chain.
 *
 * A request runs through these states:
 * 1. cache check on (lower-cased word, source language)
 * 2. routing: lines skip the dictionary stage
 * 3. dictionary providers, in registration order
 * 4. statistical providers, in registration order
 * 5. terminal fallback to an untranslated marker
 *
 * Provider failures are logged and move the request to the next provider.
 * Every outcome, including the terminal one, is cached before it is returned.
 */

use futures::future::join_all;
use log::{debug, warn};
use serde::Serialize;
use std::sync::Arc;

use super::cache::TranslationCache;
use super::cleaning::{clean_definition, clean_translation, is_degenerate, untranslated_marker};
use crate::app_config::TranslationConfig;
use crate::language_utils::language_codes_match;
use crate::providers::mymemory::MyMemory;
use crate::providers::wiktionary::Wiktionary;
use crate::providers::{LookupRequest, LookupResponse, Provider, ProviderStage};

/// Confidence of a dictionary gloss
pub const DICTIONARY_CONFIDENCE: f64 = 0.7;

/// Confidence of a machine translation
pub const STATISTICAL_CONFIDENCE: f64 = 0.6;

/// Confidence of the untranslated marker
pub const UNTRANSLATED_CONFIDENCE: f64 = 0.1;

/// Inputs with whitespace need more characters than this to count as a line
pub const MIN_LINE_CHARS: usize = 10;

/// Which stage produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Dictionary,
    Statistical,
    /// Every provider failed; the text is the bracketed input
    Untranslated,
}

impl std::fmt::Display for ResultSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Statistical => write!(f, "statistical"),
            Self::Untranslated => write!(f, "untranslated"),
        }
    }
}

/// A resolved translation; never an error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    /// Input as requested, trimmed
    pub word: String,
    /// Display text, never empty
    pub text: String,
    /// Trust in the result, in [0, 1]
    pub confidence: f64,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
    pub source: ResultSource,
}

impl TranslationResult {
    /// The low-confidence result returned when no provider could help
    pub fn untranslated(word: &str) -> Self {
        Self {
            word: word.to_string(),
            text: untranslated_marker(word),
            confidence: UNTRANSLATED_CONFIDENCE,
            pronunciation: None,
            part_of_speech: None,
            example: None,
            source: ResultSource::Untranslated,
        }
    }

    /// Whether a provider actually translated the input
    pub fn is_translated(&self) -> bool {
        self.source != ResultSource::Untranslated
    }
}

/// Routing class of an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Word,
    Line,
}

/// Classify an input as a single word or a full line
pub fn classify(text: &str) -> InputKind {
    let text = text.trim();
    if text.contains(char::is_whitespace) && text.chars().count() > MIN_LINE_CHARS {
        InputKind::Line
    } else {
        InputKind::Word
    }
}

/// Resolves words and lines through an ordered provider chain
pub struct TranslationResolver {
    providers: Vec<Arc<dyn Provider>>,
    cache: TranslationCache,
    target_language: String,
}

impl TranslationResolver {
    /// Create a resolver without providers
    pub fn new(target_language: impl Into<String>, cache: TranslationCache) -> Self {
        Self {
            providers: Vec::new(),
            cache,
            target_language: target_language.into(),
        }
    }

    /// Build the network provider chain from configuration
    pub fn from_config(config: &TranslationConfig) -> Self {
        let mut resolver = Self::new(
            config.target_language.clone(),
            TranslationCache::new(config.cache_capacity),
        );

        // Wiktionary definitions are English glosses
        if config.dictionary.enabled {
            if language_codes_match(&config.target_language, "en") {
                resolver.add_provider(Arc::new(Wiktionary::new(
                    config.dictionary.endpoint.clone(),
                    config.timeout_secs,
                )));
            } else {
                warn!(
                    "Dictionary stage disabled: definitions are English, target is '{}'",
                    config.target_language
                );
            }
        }
        if config.statistical.enabled {
            resolver.add_provider(Arc::new(MyMemory::new(
                config.statistical.endpoint.clone(),
                config.timeout_secs,
            )));
        }
        resolver
    }

    /// Append a provider; order within a stage is registration order
    pub fn add_provider(&mut self, provider: Arc<dyn Provider>) {
        debug!("Registered {} provider '{}'", provider.stage(), provider.name());
        self.providers.push(provider);
    }

    pub fn with_provider(mut self, provider: Arc<dyn Provider>) -> Self {
        self.add_provider(provider);
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Names of the registered providers in chain order
    pub fn provider_names(&self) -> Vec<String> {
        [ProviderStage::Dictionary, ProviderStage::Statistical]
            .into_iter()
            .flat_map(|stage| self.stage_providers(stage))
            .map(|provider| provider.name().to_string())
            .collect()
    }

    fn stage_providers(&self, stage: ProviderStage) -> impl Iterator<Item = &Arc<dyn Provider>> {
        self.providers.iter().filter(move |p| p.stage() == stage)
    }

    /// Translate a word or line from `source_language` into the target language
    pub async fn translate(&self, text: &str, source_language: &str) -> TranslationResult {
        let input = text.trim();
        if input.is_empty() {
            return TranslationResult::untranslated(input);
        }

        if let Some(cached) = self.cache.get(input, source_language) {
            return cached;
        }

        let request = LookupRequest::new(input, source_language, self.target_language.clone());

        let mut result = None;
        if classify(input) == InputKind::Word {
            result = self.try_dictionary(&request).await;
        }
        if result.is_none() {
            result = self.try_statistical(&request).await;
        }
        let result = result.unwrap_or_else(|| {
            warn!(
                "No provider could translate '{}' ({}), returning marker",
                input, source_language
            );
            TranslationResult::untranslated(input)
        });

        self.cache.store(input, source_language, result.clone());
        result
    }

    /// Translate several inputs concurrently; results keep input order
    pub async fn translate_many<S: AsRef<str>>(
        &self,
        inputs: &[S],
        source_language: &str,
    ) -> Vec<TranslationResult> {
        join_all(
            inputs
                .iter()
                .map(|input| self.translate(input.as_ref(), source_language)),
        )
        .await
    }

    async fn try_dictionary(&self, request: &LookupRequest) -> Option<TranslationResult> {
        for provider in self.stage_providers(ProviderStage::Dictionary) {
            if !provider.supports_target(&request.target_language) {
                debug!(
                    "Skipping {}: no glosses in '{}'",
                    provider.name(),
                    request.target_language
                );
                continue;
            }
            match provider.complete(request.clone()).await {
                Ok(response) => {
                    let text = clean_definition(&response.text);
                    if text.is_empty() {
                        warn!("{} returned an empty definition for '{}'", provider.name(), request.text);
                        continue;
                    }
                    debug!("{} defined '{}' as '{}'", provider.name(), request.text, text);
                    return Some(build_result(
                        request,
                        text,
                        response,
                        DICTIONARY_CONFIDENCE,
                        ResultSource::Dictionary,
                    ));
                }
                Err(e) => warn!("{} failed for '{}': {}", provider.name(), request.text, e),
            }
        }
        None
    }

    async fn try_statistical(&self, request: &LookupRequest) -> Option<TranslationResult> {
        for provider in self.stage_providers(ProviderStage::Statistical) {
            match provider.complete(request.clone()).await {
                Ok(response) => {
                    if is_degenerate(&request.text, &response.text) {
                        warn!(
                            "{} returned degenerate output for '{}': '{}'",
                            provider.name(),
                            request.text,
                            response.text
                        );
                        continue;
                    }
                    let text = clean_translation(&response.text);
                    if is_degenerate(&request.text, &text) {
                        warn!(
                            "{} output for '{}' reduces to the input after cleaning: '{}'",
                            provider.name(),
                            request.text,
                            response.text
                        );
                        continue;
                    }
                    debug!("{} translated '{}' as '{}'", provider.name(), request.text, text);
                    return Some(build_result(
                        request,
                        text,
                        response,
                        STATISTICAL_CONFIDENCE,
                        ResultSource::Statistical,
                    ));
                }
                Err(e) => warn!("{} failed for '{}': {}", provider.name(), request.text, e),
            }
        }
        None
    }
}

fn build_result(
    request: &LookupRequest,
    text: String,
    response: LookupResponse,
    confidence: f64,
    source: ResultSource,
) -> TranslationResult {
    TranslationResult {
        word: request.text.clone(),
        text,
        confidence,
        pronunciation: response.pronunciation.filter(|p| !p.trim().is_empty()),
        part_of_speech: response.part_of_speech.filter(|p| !p.trim().is_empty()),
        example: response
            .example
            .map(|example| clean_definition(&example))
            .filter(|example| !example.is_empty()),
        source,
    }
}
