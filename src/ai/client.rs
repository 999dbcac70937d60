use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{AiError, AiResult};
use crate::config::Config;

/// Sampling parameters forwarded to the service. Omitted fields use the
/// service's own defaults.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

/// The single capability the rest of the crate needs from the service:
/// prompt in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> AiResult<String>;
}

/// Client for Google's Generative Language REST API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl GeminiClient {
    /// `None` when no API key is configured; callers treat that as "run on
    /// defaults", not as an error.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.ai().api_key()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: config.ai().api_base().to_string(),
            model: config.ai().model().to_string(),
        })
    }

    /// Environment-only constructor for operator tooling: `GEMINI_API_KEY`
    /// plus the default endpoint and model.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-pro".to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: &'a GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> AiResult<String> {
        debug!("calling text generation service, model: {}", self.model);
        debug!("prompt length: {} chars", prompt.len());

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: config,
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("text generation request failed: {}", e);
                AiError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("text generation service replied with {}", status);
            return Err(AiError::UnexpectedStatus(status));
        }

        let reply: GenerateContentResponse = response.json().await?;

        let text = reply
            .candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyReply);
        }

        debug!("text generation call succeeded");
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn generation_config_serializes_camel_case_and_skips_none() {
        let config = GenerationConfig {
            temperature: Some(0.9),
            top_p: Some(0.8),
            top_k: Some(40),
            max_output_tokens: Some(4096),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["temperature"], serde_json::json!(0.9));
        assert_eq!(json["topP"], serde_json::json!(0.8));
        assert_eq!(json["topK"], serde_json::json!(40));
        assert_eq!(json["maxOutputTokens"], serde_json::json!(4096));

        let empty = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(empty, serde_json::json!({}));
    }

    #[test]
    fn response_text_concatenates_parts() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Hello, "}, {"text": "world"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed.candidates[0]
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        assert_eq!(text, "Hello, world");
    }

    #[test]
    fn response_tolerates_missing_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
