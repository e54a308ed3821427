use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("API key is missing. Please set GEMINI_API_KEY in the environment.")]
    MissingApiKey,

    #[error("No response generated from the model.")]
    EmptyResponse,

    #[error("Failed to analyze the article. Please check the URL or try again later.")]
    AnalysisFailed,

    #[error("No image data found in response.")]
    NoImageData,

    #[error("Failed to generate image.")]
    ImageFailed,

    /// Transport or protocol failure; clients log the detail and map it to a generic error.
    #[error("Remote call failed: {0}")]
    Remote(String),

    #[error("Please enter a news article URL.")]
    EmptyUrl,

    #[error("An analysis is already in progress.")]
    Busy,

    #[error("Image generation is not available right now.")]
    ImageUnavailable,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::EmptyUrl => StatusCode::BAD_REQUEST,
            AppError::Busy | AppError::ImageUnavailable => StatusCode::CONFLICT,
            AppError::EmptyResponse | AppError::NoImageData => StatusCode::BAD_GATEWAY,
            AppError::AnalysisFailed | AppError::ImageFailed | AppError::Remote(_) => StatusCode::BAD_GATEWAY,
            AppError::MissingApiKey | AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Remote(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Remote(format!("malformed JSON: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
