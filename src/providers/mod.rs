/*!
 * Provider implementations for the translation lookup chain.
 *
 * This module contains clients for the external lookup services:
 * - Wiktionary: dictionary-style definitions for single words
 * - MyMemory: statistical machine translation for words and lines
 * - Mock: scripted provider for tests
 */

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

use crate::errors::ProviderError;

/// Where in the lookup chain a provider sits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderStage {
    /// Definition lookup, single words only
    Dictionary,
    /// General-purpose machine translation of any text
    Statistical,
}

impl std::fmt::Display for ProviderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dictionary => write!(f, "dictionary"),
            Self::Statistical => write!(f, "statistical"),
        }
    }
}

/// A single lookup sent to a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    /// Word or line to translate
    pub text: String,
    /// Source language code, e.g. "ko"
    pub source_language: String,
    /// Target language code, e.g. "en"
    pub target_language: String,
}

impl LookupRequest {
    pub fn new(
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Raw provider answer, before cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupResponse {
    pub text: String,
    pub pronunciation: Option<String>,
    pub part_of_speech: Option<String>,
    pub example: Option<String>,
}

impl LookupResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Common trait for all lookup providers
///
/// Implementations are used interchangeably by the translation resolver,
/// which orders them by [`ProviderStage`].
#[async_trait]
pub trait Provider: Send + Sync + Debug {
    /// Short identifier used in logs and results
    fn name(&self) -> &str;

    /// Chain stage this provider belongs to
    fn stage(&self) -> ProviderStage;

    /// Whether results can be produced in the given target language
    fn supports_target(&self, _target_language: &str) -> bool {
        true
    }

    /// Look up a word or line
    async fn complete(&self, request: LookupRequest) -> Result<LookupResponse, ProviderError>;
}

/// HTTP client shared by the network providers
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("songlingo/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_default()
}

/// Turn a non-success response into a provider error
pub(crate) async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    Err(ProviderError::ApiError {
        status_code: status.as_u16(),
        message,
    })
}

pub mod mock;
pub mod mymemory;
pub mod wiktionary;
