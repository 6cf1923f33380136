use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::ProviderError;
use crate::languages::language_name;
use crate::providers::TranslationProvider;

/// Default public endpoint for the Generative Language API
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Gemini client for the Google Generative Language API
#[derive(Debug)]
pub struct Gemini {
    /// HTTP client for API requests
    client: Client,
    /// API key for authentication
    api_key: String,
    /// API endpoint URL (optional, defaults to public API)
    endpoint: String,
    /// Model identifier, e.g. "gemini-2.5-flash"
    model: String,
}

/// Gemini generateContent request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<GeminiContent>,
}

/// A content block in a Gemini request or response
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiContent {
    /// Text parts of this block
    pub parts: Vec<GeminiPart>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// The text content
    pub text: String,
}

/// Gemini generateContent response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    /// Generated candidates; the first one carries the translation
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

/// One generated candidate
#[derive(Debug, Deserialize)]
pub struct GeminiCandidate {
    /// The candidate content
    pub content: GeminiContent,
}

impl GeminiRequest {
    /// Create a single-turn request from one prompt
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.into(),
                }],
            }],
        }
    }
}

impl Gemini {
    /// Create a new Gemini client
    pub fn new(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Build the translation prompt from the language display names
    pub fn build_prompt(text: &str, from_lang: &str, to_lang: &str) -> String {
        let from = language_name(from_lang);
        let to = language_name(to_lang);
        format!(
            "Translate this text from {from} to {to}. \
             Provide only the translation, with examples in {to} only and no additional text: \"{text}\". \
             Please follow the next format:\n\
             Translation\n\
             Examples\n\
             Please, do not include these words like translation and examples."
        )
    }

    /// Send a generateContent request
    pub async fn complete(&self, request: GeminiRequest) -> Result<GeminiResponse, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let base = if self.endpoint.is_empty() {
            DEFAULT_ENDPOINT
        } else {
            self.endpoint.trim_end_matches('/')
        };
        let api_url = format!("{}/v1beta/models/{}:generateContent", base, self.model);

        let response = self
            .client
            .post(&api_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Gemini API error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let gemini_response = response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        Ok(gemini_response)
    }

    /// Extract the generated text from a Gemini response
    pub fn extract_text_from_response(response: &GeminiResponse) -> String {
        response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl TranslationProvider for Gemini {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn translate(
        &self,
        text: &str,
        from_lang: &str,
        to_lang: &str,
    ) -> Result<String, ProviderError> {
        let prompt = Self::build_prompt(text, from_lang, to_lang);
        let response = self.complete(GeminiRequest::from_prompt(prompt)).await?;
        Ok(Self::extract_text_from_response(&response).trim().to_string())
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        self.complete(GeminiRequest::from_prompt("Hello")).await?;
        Ok(())
    }
}
