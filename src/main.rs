use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use news_chronicle::{
    config::Config,
    api::routes::create_router,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::load()?;
    let server_addr = config.server_addr;
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; analysis and image requests will fail until it is configured");
    }
    info!(
        analysis_model = %config.analysis_model,
        image_model = %config.image_model,
        language = %config.output_language,
        "configuration loaded"
    );

    let app = create_router(AppState::from_config(config));

    let listener = TcpListener::bind(server_addr).await?;
    info!(addr = %server_addr, "NewsChronicle listening");
    axum::serve(listener, app).await?;

    Ok(())
}
