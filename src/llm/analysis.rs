use std::time::Instant;

use tracing::{error, info, warn};

use super::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, TimelineAnalyzer, Tool};
use crate::error::{AppError, Result};
use crate::model::NewsAnalysis;
use crate::prompt::{build_analysis_prompt, timeline_schema};

#[async_trait::async_trait]
impl TimelineAnalyzer for GeminiClient {
    async fn analyze(&self, url: &str) -> Result<NewsAnalysis> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content::user_text(build_analysis_prompt(url, &self.output_language))],
            tools: vec![Tool::google_search()],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(timeline_schema(&self.output_language)),
                ..Default::default()
            }),
        };

        info!(url = %url, model = %self.analysis_model, "requesting timeline analysis");
        let start = Instant::now();

        let response = match self.generate_content(&self.analysis_model, api_key, &request).await {
            Ok(response) => response,
            Err(err) => {
                error!(url = %url, error = %err, "Gemini analysis call failed");
                return Err(AppError::AnalysisFailed);
            }
        };

        let text = response.text().ok_or_else(|| {
            warn!(url = %url, "Gemini returned no text for analysis");
            AppError::EmptyResponse
        })?;

        let analysis = parse_analysis(&text).map_err(|err| {
            error!(url = %url, error = %err, "Gemini analysis did not match the timeline schema");
            AppError::AnalysisFailed
        })?;

        info!(
            url = %url,
            events = analysis.events.len(),
            elapsed = ?start.elapsed(),
            "timeline analysis complete"
        );
        Ok(analysis)
    }
}

/// Strict parse of the model's JSON output. No repair is attempted.
pub fn parse_analysis(text: &str) -> Result<NewsAnalysis> {
    Ok(serde_json::from_str(text.trim())?)
}
