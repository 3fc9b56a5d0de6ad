use serde::{Deserialize, Serialize};

/// Body of `POST /ai-analysis`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub prompt: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub user_id: String,
}

/// Generated-text envelope returned by both routes.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResponse {
    pub generated_text: String,
}

/// Medical profile row fetched from the profile store. Every field is
/// optional; a row may exist with any subset populated.
#[derive(Debug, Clone, Deserialize)]
pub struct PatientProfile {
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medication: Option<String>,
}
