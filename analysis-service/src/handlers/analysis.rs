use crate::models::{AnalysisRequest, GeneratedResponse};
use crate::services::prompt::compose_prompt;
use crate::AppState;
use anyhow::anyhow;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::Json,
};
use service_core::error::AppError;

const CHAT_PERSONA: &str = "You are a helpful AI doctor assistant specializing in general health inquiries. Provide clear, concise, and professional medical guidance. Use patient context if provided.";

const GENERAL_PERSONA: &str = "You are a helpful AI assistant specializing in providing medical and health-related guidance.";

/// Fallback when the provider returns an empty chat message. The report
/// route uses its own variant without the trailing period; the two literals
/// are intentionally distinct.
const EMPTY_COMPLETION_FALLBACK: &str = "No response available.";

pub async fn ai_analysis(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::AuthError(anyhow!("Missing Authorization header")))?;

    let token = auth_header.trim_start_matches("Bearer ");

    state.identity.verify_user(token, &request.user_id).await?;

    // Profile enrichment is best-effort; a missing row or a lookup failure
    // leaves the prompt without patient context.
    let profile = state.identity.fetch_profile(&request.user_id).await;
    let prompt = compose_prompt(&request.prompt, profile.as_ref());

    let system = if request.request_type == "chat" {
        CHAT_PERSONA
    } else {
        GENERAL_PERSONA
    };

    let generated_text = state
        .completion
        .generate_text(system, &prompt)
        .await?
        .unwrap_or_else(|| EMPTY_COMPLETION_FALLBACK.to_string());

    tracing::info!(user_id = %request.user_id, "Analysis generated");

    Ok(Json(GeneratedResponse { generated_text }))
}
