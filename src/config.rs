use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use crate::error::{AppError, Result};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_ANALYSIS_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_OUTPUT_LANGUAGE: &str = "Simplified Chinese (简体中文)";
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: SocketAddr,
    /// Absent keys are not fatal here; every remote call checks before sending.
    pub gemini_api_key: Option<String>,
    pub api_base: String,
    pub analysis_model: String,
    pub image_model: String,
    pub output_language: String,
    pub image_aspect_ratio: String,
    pub default_url: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY"));

        let host = non_empty("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = non_empty("PORT").unwrap_or_else(|| "3000".to_string());
        let port = port.parse::<u16>().map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?;
        let ip = IpAddr::from_str(&host).map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?;

        Ok(Config {
            server_addr: SocketAddr::new(ip, port),
            gemini_api_key,
            api_base: non_empty("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            analysis_model: non_empty("ANALYSIS_MODEL").unwrap_or_else(|| DEFAULT_ANALYSIS_MODEL.to_string()),
            image_model: non_empty("IMAGE_MODEL").unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            output_language: non_empty("OUTPUT_LANGUAGE").unwrap_or_else(|| DEFAULT_OUTPUT_LANGUAGE.to_string()),
            image_aspect_ratio: non_empty("IMAGE_ASPECT_RATIO").unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string()),
            default_url: lookup("DEFAULT_NEWS_URL").unwrap_or_default().trim().to_string(),
        })
    }
}
