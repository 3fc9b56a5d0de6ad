use crate::models::GeneratedResponse;
use crate::AppState;
use anyhow::anyhow;
use axum::{
    extract::{Multipart, State},
    response::Json,
};
use service_core::error::AppError;

const REPORT_PERSONA: &str = "You are a medical report analysis assistant. Provide a structured and professional analysis.";

const REPORT_INSTRUCTION: &str = "You are a licensed clinical assistant. Please analyze the uploaded medical report image.\n\nReturn a structured summary with the following format:\n- Key Findings:\n- Possible Concerns:\n- Suggested Next Steps:\n- Notes for the Patient:\n\nBe concise and professional.";

const REPORT_MAX_TOKENS: u32 = 300;
const REPORT_TEMPERATURE: f32 = 0.5;

/// Fallback when the provider returns an empty analysis. Deliberately has no
/// trailing period, unlike the chat route's fallback.
const EMPTY_ANALYSIS_FALLBACK: &str = "No response available";

pub async fn analyze_report(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GeneratedResponse>, AppError> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(anyhow!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some("image") {
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(anyhow!("Failed to read file bytes: {}", e))
            })?;
            image = Some(data.to_vec());
            break;
        }
    }

    // Validation happens before any upstream call is attempted.
    let image = image.ok_or_else(|| AppError::BadRequest(anyhow!("No image provided")))?;

    tracing::info!(size = image.len(), "Received report image");

    let image_url = state.media.upload_image(image).await?;

    let generated_text = state
        .completion
        .analyze_image(
            REPORT_PERSONA,
            REPORT_INSTRUCTION,
            &image_url,
            REPORT_MAX_TOKENS,
            REPORT_TEMPERATURE,
        )
        .await?
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| EMPTY_ANALYSIS_FALLBACK.to_string());

    Ok(Json(GeneratedResponse { generated_text }))
}
