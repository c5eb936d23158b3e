/*!
 * Wiktionary definition client.
 *
 * Queries the REST definition endpoint for a single word and returns the first
 * usable definition listed under the source language.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

use super::{LookupRequest, LookupResponse, Provider, ProviderStage, ensure_success, http_client};
use crate::errors::ProviderError;
use crate::language_utils::language_codes_match;

/// Default definition endpoint; the word is appended as a path segment
pub const DEFAULT_ENDPOINT: &str = "https://en.wiktionary.org/api/rest_v1/page/definition";

/// One part-of-speech section of a definition response
#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(rename = "partOfSpeech", default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definitions: Vec<Definition>,
}

#[derive(Debug, Deserialize)]
struct Definition {
    #[serde(default)]
    definition: String,
    #[serde(default)]
    examples: Vec<String>,
}

/// Wiktionary client for dictionary-stage lookups
#[derive(Debug, Clone)]
pub struct Wiktionary {
    endpoint: String,
    client: Client,
}

impl Wiktionary {
    pub fn new(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: if endpoint.is_empty() {
                DEFAULT_ENDPOINT.to_string()
            } else {
                endpoint
            },
            client: http_client(timeout_secs),
        }
    }

    /// Definition URL for a word
    pub fn definition_url(&self, word: &str) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.endpoint)
            .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::RequestFailed("Endpoint cannot take a path".to_string()))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }
}

/// Pick the first non-empty definition for a language out of a response body
pub fn parse_definition(body: &str, language_code: &str) -> Result<LookupResponse, ProviderError> {
    let sections: HashMap<String, Vec<Usage>> = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid definition response: {}", e)))?;

    let usages = sections
        .get(language_code)
        .ok_or_else(|| ProviderError::NoResult(format!("No '{}' section", language_code)))?;

    usages
        .iter()
        .flat_map(|usage| {
            usage
                .definitions
                .iter()
                .map(move |definition| (usage, definition))
        })
        .find(|(_, definition)| !definition.definition.trim().is_empty())
        .map(|(usage, definition)| LookupResponse {
            text: definition.definition.clone(),
            pronunciation: None,
            part_of_speech: usage.part_of_speech.clone(),
            example: definition.examples.first().cloned(),
        })
        .ok_or_else(|| ProviderError::NoResult(format!("No definition under '{}'", language_code)))
}

#[async_trait]
impl Provider for Wiktionary {
    fn name(&self) -> &str {
        "wiktionary"
    }

    fn stage(&self) -> ProviderStage {
        ProviderStage::Dictionary
    }

    fn supports_target(&self, target_language: &str) -> bool {
        language_codes_match(target_language, "en")
    }

    async fn complete(&self, request: LookupRequest) -> Result<LookupResponse, ProviderError> {
        let url = self.definition_url(&request.text)?;
        debug!("Wiktionary lookup: {}", url);

        let response = self.client.get(url).send().await?;
        let body = ensure_success(response).await?.text().await?;
        parse_definition(&body, &request.source_language)
    }
}
