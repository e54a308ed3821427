use axum::{
    routing::{get, post},
    Router,
    extract::{Form, Json, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use tower_http::cors::{CorsLayer, Any};
use tracing::{debug, info};

use crate::api::models::{AnalyzeRequest, HealthResponse};
use crate::api::response::{self, ApiResponse};
use crate::error::AppError;
use crate::state::ViewState;
use crate::view::render_page;
use crate::AppState;

type ApiResult = (StatusCode, axum::Json<ApiResponse<ViewState>>);

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/analyze", post(analyze_form_handler))
        .route("/image", post(image_form_handler))
        .route("/api/state", get(state_handler))
        .route("/api/analyze", post(analyze_api_handler))
        .route("/api/image", post(image_api_handler))
        .route("/health", get(health_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn page_handler(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.controller.snapshot().await;
    Html(render_page(&snapshot))
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, axum::Json<ApiResponse<HealthResponse>>) {
    let config = &state.config;
    response::success(HealthResponse {
        status: "ok",
        analysis_model: config.analysis_model.clone(),
        image_model: config.image_model.clone(),
        api_key_configured: config.gemini_api_key.is_some(),
    })
}

fn log_rejection(action: &str, err: &AppError) {
    // Guard rejections are expected (double submit, stale button); the page shows the unchanged state.
    debug!(action, reason = %err, "request rejected by session guard");
}

async fn analyze_form_handler(
    State(state): State<AppState>,
    Form(req): Form<AnalyzeRequest>,
) -> Redirect {
    match state.controller.spawn_submit(req.url.as_deref()).await {
        Ok(()) => info!("analysis submitted from page"),
        Err(err) => log_rejection("analyze", &err),
    }
    Redirect::to("/")
}

async fn image_form_handler(State(state): State<AppState>) -> Redirect {
    match state.controller.spawn_generate_image().await {
        Ok(()) => info!("image generation requested from page"),
        Err(err) => log_rejection("image", &err),
    }
    Redirect::to("/")
}

async fn state_handler(State(state): State<AppState>) -> ApiResult {
    let snapshot = state.controller.snapshot().await;
    response::success(ViewState::clone(&snapshot))
}

async fn analyze_api_handler(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> ApiResult {
    let start = std::time::Instant::now();
    match state.controller.submit(req.url.as_deref()).await {
        Ok(snapshot) => {
            info!(phase = ?snapshot.phase, elapsed = ?start.elapsed(), "API analysis finished");
            response::success(ViewState::clone(&snapshot))
        }
        Err(err) => {
            log_rejection("analyze", &err);
            response::rejected(&err)
        }
    }
}

/// A failed generation still answers with the snapshot; image errors never surface.
async fn image_api_handler(State(state): State<AppState>) -> ApiResult {
    match state.controller.generate_image().await {
        Ok(snapshot) => response::success(ViewState::clone(&snapshot)),
        Err(err) => {
            log_rejection("image", &err);
            response::rejected(&err)
        }
    }
}
