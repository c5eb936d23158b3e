/*!
 * MyMemory machine-translation client.
 *
 * Sends the full text with a `source|target` locale pair and returns the
 * translated text from the response body.
 */

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{LookupRequest, LookupResponse, Provider, ProviderStage, ensure_success, http_client};
use crate::errors::ProviderError;

/// Default translation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    #[serde(rename = "responseStatus", default)]
    response_status: Option<serde_json::Value>,
    #[serde(rename = "responseDetails", default)]
    response_details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

/// Locale tag the service expects for a short language code
pub fn locale_for(language_code: &str) -> String {
    match language_code {
        "en" => "en-US",
        "ko" => "ko-KR",
        "es" => "es-ES",
        "fr" => "fr-FR",
        "de" => "de-DE",
        "ja" => "ja-JP",
        "it" => "it-IT",
        "pt" => "pt-PT",
        "zh" => "zh-CN",
        other => other,
    }
    .to_string()
}

/// MyMemory client for statistical-stage lookups
#[derive(Debug, Clone)]
pub struct MyMemory {
    endpoint: String,
    client: Client,
}

impl MyMemory {
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

    /// Request URL for a lookup
    pub fn translate_url(&self, request: &LookupRequest) -> Result<Url, ProviderError> {
        let langpair = format!(
            "{}|{}",
            locale_for(&request.source_language),
            locale_for(&request.target_language)
        );
        Url::parse_with_params(
            &self.endpoint,
            &[("q", request.text.as_str()), ("langpair", langpair.as_str())],
        )
        .map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint: {}", e)))
    }
}

/// Extract the translated text from a response body
pub fn parse_translation(body: &str) -> Result<LookupResponse, ProviderError> {
    let parsed: TranslateResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("Invalid translation response: {}", e)))?;

    // The service reports its own status inside a 200 response
    let status = parsed.response_status.as_ref().and_then(|value| match value {
        serde_json::Value::Number(n) => n.as_u64(),
        serde_json::Value::String(s) => s.parse().ok(),
        _ => None,
    });
    if let Some(code) = status.filter(|code| *code != 200) {
        let message = parsed
            .response_details
            .map(|details| details.to_string())
            .unwrap_or_default();
        return Err(ProviderError::ApiError {
            status_code: u16::try_from(code).unwrap_or(u16::MAX),
            message,
        });
    }

    parsed
        .response_data
        .and_then(|data| data.translated_text)
        .filter(|text| !text.trim().is_empty())
        .map(LookupResponse::text)
        .ok_or_else(|| ProviderError::NoResult("Empty translation".to_string()))
}

#[async_trait]
impl Provider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    fn stage(&self) -> ProviderStage {
        ProviderStage::Statistical
    }

    async fn complete(&self, request: LookupRequest) -> Result<LookupResponse, ProviderError> {
        let url = self.translate_url(&request)?;
        debug!("MyMemory lookup: {}", url);

        let response = self.client.get(url).send().await?;
        let body = ensure_success(response).await?.text().await?;
        parse_translation(&body)
    }
}
