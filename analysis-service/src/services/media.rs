use crate::config::MediaSettings;
use anyhow::anyhow;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use service_core::error::AppError;
use sha2::{Digest, Sha256};

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
}

pub struct MediaClient {
    client: Client,
    settings: MediaSettings,
}

impl MediaClient {
    pub fn new(settings: MediaSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Upload an in-memory image under the configured folder namespace and
    /// resolve to its hosted HTTPS URL. Failures surface directly; no retry.
    pub async fn upload_image(&self, data: Vec<u8>) -> Result<String, AppError> {
        let timestamp = chrono::Utc::now().timestamp();
        let signature = self.sign(timestamp);

        let form = Form::new()
            .part("file", Part::bytes(data).file_name("report"))
            .text("api_key", self.settings.api_key.clone())
            .text("timestamp", timestamp.to_string())
            .text("folder", self.settings.folder.clone())
            .text("signature", signature);

        let url = format!(
            "{}/{}/image/upload",
            self.settings.base_url, self.settings.cloud_name
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Media upload failed: {}", e);
                AppError::UpstreamError(anyhow!("Image upload failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(anyhow!(
                "Media host error {}: {}",
                status,
                error_text
            )));
        }

        let uploaded: UploadResponse = response.json().await.map_err(|e| {
            AppError::UpstreamError(anyhow!("Failed to parse upload response: {}", e))
        })?;

        uploaded
            .secure_url
            .ok_or_else(|| AppError::UpstreamError(anyhow!("Upload response missing secure_url")))
    }

    /// Signed-upload signature: SHA-256 over the alphabetically ordered
    /// parameter string with the API secret appended, hex-encoded.
    fn sign(&self, timestamp: i64) -> String {
        let payload = format!(
            "folder={}&timestamp={}{}",
            self.settings.folder,
            timestamp,
            self.settings.api_secret.expose_secret()
        );

        hex::encode(Sha256::digest(payload.as_bytes()))
    }
}
