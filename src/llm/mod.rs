//! Gemini `generateContent` transport plus the two remote clients built on it.

use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::NewsAnalysis;

pub mod analysis;
pub mod image;

// Shared client to reuse connections. No request timeout: remote calls run to completion.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .build()
        .expect("Failed to build HTTP client")
});

/// Turns an article URL into a structured timeline.
#[async_trait::async_trait]
pub trait TimelineAnalyzer: Send + Sync {
    async fn analyze(&self, url: &str) -> Result<NewsAnalysis>;
}

/// Produces an illustration for an analysis, returned as a `data:` URI.
#[async_trait::async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, headline: &str, summary: &str) -> Result<String>;
}

#[derive(Clone, Debug)]
pub struct GeminiClient {
    api_key: Option<String>,
    api_base: String,
    analysis_model: String,
    image_model: String,
    output_language: String,
    aspect_ratio: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key.clone(),
            api_base: config.api_base.clone(),
            analysis_model: config.analysis_model.clone(),
            image_model: config.image_model.clone(),
            output_language: config.output_language.clone(),
            aspect_ratio: config.image_aspect_ratio.clone(),
        }
    }

    /// Checked before every call so a missing key never reaches the network.
    fn api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(AppError::MissingApiKey)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_base, model)
    }

    async fn generate_content(
        &self,
        model: &str,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = CLIENT
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Remote(format!("Gemini API error {}: {}", status, body)));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user_text(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text),
                inline_data: None,
            }],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct Tool {
    google_search: GoogleSearch,
}

impl Tool {
    fn google_search() -> Self {
        Self {
            google_search: GoogleSearch {},
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct GoogleSearch {}

#[derive(Serialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_config: Option<ImageConfig>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageConfig {
    aspect_ratio: String,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug, Default)]
pub(crate) struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateContentResponse {
    fn first_parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts of the first candidate, or `None` when there is no text.
    fn text(&self) -> Option<String> {
        let text: String = self
            .first_parts()
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }

    fn first_inline_data(&self) -> Option<&InlineData> {
        self.first_parts()
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }
}
