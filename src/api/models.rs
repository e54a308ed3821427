use serde::{Deserialize, Serialize};

/// Body of `POST /analyze` (form) and `POST /api/analyze` (JSON).
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    /// When absent the URL already held in the view state is submitted.
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub analysis_model: String,
    pub image_model: String,
    pub api_key_configured: bool,
}
