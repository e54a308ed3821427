use std::time::Instant;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, error, info, warn};

use super::{Content, GeminiClient, GenerateContentRequest, GenerationConfig, ImageConfig, ImageGenerator, InlineData};
use crate::error::{AppError, Result};
use crate::prompt::build_image_prompt;

#[async_trait::async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(&self, headline: &str, summary: &str) -> Result<String> {
        let api_key = self.api_key()?;

        let request = GenerateContentRequest {
            contents: vec![Content::user_text(build_image_prompt(headline, summary))],
            tools: Vec::new(),
            generation_config: Some(GenerationConfig {
                image_config: Some(ImageConfig {
                    aspect_ratio: self.aspect_ratio.clone(),
                }),
                ..Default::default()
            }),
        };

        info!(model = %self.image_model, aspect_ratio = %self.aspect_ratio, "requesting illustration");
        let start = Instant::now();

        let response = match self.generate_content(&self.image_model, api_key, &request).await {
            Ok(response) => response,
            Err(err) => {
                error!(error = %err, "Gemini image call failed");
                return Err(AppError::ImageFailed);
            }
        };

        let inline = response.first_inline_data().ok_or_else(|| {
            warn!("Gemini image response carried no inline image part");
            AppError::NoImageData
        })?;

        let uri = to_data_uri(inline)?;
        info!(elapsed = ?start.elapsed(), "illustration ready");
        Ok(uri)
    }
}

/// `data:{mime};base64,{payload}`, after checking that the payload actually decodes.
pub(crate) fn to_data_uri(inline: &InlineData) -> Result<String> {
    let bytes = BASE64.decode(inline.data.as_bytes()).map_err(|err| {
        warn!(error = %err, "inline image payload is not valid base64");
        AppError::NoImageData
    })?;

    if bytes.is_empty() || inline.mime_type.trim().is_empty() {
        return Err(AppError::NoImageData);
    }

    debug!(mime_type = %inline.mime_type, bytes = bytes.len(), "decoded inline image");
    Ok(format!("data:{};base64,{}", inline.mime_type, inline.data))
}
