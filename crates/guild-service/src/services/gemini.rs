//! Gemini `generateContent` client used to write build guides

use std::time::Duration;

use async_trait::async_trait;
use guild_common::AiConfig;
use guild_core::{DomainError, GuideGenerator};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::error::{ServiceError, ServiceResult};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

/// HTTPS client for the Gemini text generation API
#[derive(Debug, Clone)]
pub struct GeminiGuideGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiGuideGenerator {
    /// Build a client from configuration; `None` when no API key is set
    pub fn from_config(config: &AiConfig) -> ServiceResult<Option<Self>> {
        let Some(api_key) = config.api_key.clone().filter(|key| !key.trim().is_empty()) else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| ServiceError::internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Some(Self {
            client,
            api_key,
            endpoint: endpoint_url(&config.base_url, &config.model),
        }))
    }
}

fn endpoint_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{model}:generateContent", base_url.trim_end_matches('/'))
}

#[async_trait]
impl GuideGenerator for GeminiGuideGenerator {
    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::UpstreamError(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamError(format!("API returned status: {status}")));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| DomainError::UpstreamError(format!("invalid response body: {e}")))?;

        let text = parsed
            .into_text()
            .ok_or_else(|| DomainError::UpstreamError("response contained no text".to_string()))?;
        debug!(guide_len = text.len(), "Guide generated");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ai_config(api_key: Option<&str>) -> AiConfig {
        AiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            timeout_seconds: 60,
            language: "Spanish".to_string(),
        }
    }

    #[test]
    fn test_no_key_no_client() {
        assert!(GeminiGuideGenerator::from_config(&ai_config(None)).unwrap().is_none());
        assert!(GeminiGuideGenerator::from_config(&ai_config(Some("  "))).unwrap().is_none());
    }

    #[test]
    fn test_endpoint_url() {
        let generator = GeminiGuideGenerator::from_config(&ai_config(Some("key")))
            .unwrap()
            .unwrap();
        assert_eq!(
            generator.endpoint,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: "hello" }],
            }],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let parsed: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "**Estrategia** " }, { "text": "General" }] }
            }]
        }))
        .unwrap();
        assert_eq!(parsed.into_text().unwrap(), "**Estrategia** General");

        let empty: GenerateContentResponse =
            serde_json::from_value(json!({ "candidates": [] })).unwrap();
        assert!(empty.into_text().is_none());
    }
}
