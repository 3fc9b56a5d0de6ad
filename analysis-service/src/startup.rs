use axum::http::{header, HeaderValue, Method};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::tracing::request_id_middleware;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;
use crate::handlers::{analysis::ai_analysis, app::health_check, reports::analyze_report};
use crate::services::{
    completion::CompletionClient, identity::IdentityClient, media::MediaClient,
};
use crate::AppState;

/// Maximum accepted upload size for report images.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub fn build_state(settings: &Settings) -> AppState {
    AppState::new(
        Arc::new(IdentityClient::new(settings.identity.clone())),
        Arc::new(CompletionClient::new(settings.openai.clone())),
        Arc::new(MediaClient::new(settings.media.clone())),
    )
}

pub fn build_router(settings: &Settings, state: AppState) -> Router {
    let allowed_origin = settings
        .cors
        .allowed_origin
        .parse::<HeaderValue>()
        .expect("Invalid CORS allowed_origin");

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_check))
        .route("/ai-analysis", post(ai_analysis))
        .route("/reports", post(analyze_report))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        // Add tracing layer
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        // Add tracing middleware for request_id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
