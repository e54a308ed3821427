pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod llm;
pub mod model;
pub mod prompt;
pub mod state;
pub mod view;

use std::sync::Arc;
use config::Config;
use controller::SessionController;
use llm::GeminiClient;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub controller: Arc<SessionController>,
}

impl AppState {
    /// Wires the Gemini client into a fresh session.
    pub fn from_config(config: Config) -> Self {
        let gemini = Arc::new(GeminiClient::from_config(&config));
        let controller = SessionController::new(gemini.clone(), gemini, config.default_url.clone());
        Self {
            config: Arc::new(config),
            controller: Arc::new(controller),
        }
    }
}
