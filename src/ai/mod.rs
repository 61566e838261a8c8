//! Generative-AI client used by the vent service.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("AI API key is not configured")]
    MissingApiKey,
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI API returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("AI response contained no text")]
    EmptyResponse,
}

/// Text-in, text-out generation backend
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AiError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// First text part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .find_map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

/// Google Gemini `generateContent` over HTTPS
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn from_config(config: &AiConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<GenerateResponse>()
            .await?
            .into_text()
            .ok_or(AiError::EmptyResponse)
    }
}
