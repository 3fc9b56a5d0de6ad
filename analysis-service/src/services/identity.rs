use crate::config::IdentitySettings;
use crate::models::PatientProfile;
use anyhow::anyhow;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use service_core::error::AppError;

#[derive(Deserialize)]
struct ResolvedUser {
    id: String,
}

pub struct IdentityClient {
    client: Client,
    settings: IdentitySettings,
}

impl IdentityClient {
    pub fn new(settings: IdentitySettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Verify that the bearer token resolves to exactly the claimed user id.
    ///
    /// Provider rejection, a malformed provider response, and an identity
    /// mismatch all surface as the same authentication failure.
    pub async fn verify_user(&self, token: &str, claimed_id: &str) -> Result<(), AppError> {
        let resolved = self.resolve_user(token).await?;

        if resolved != claimed_id {
            tracing::warn!(
                claimed_id = %claimed_id,
                "Token identity does not match claimed user"
            );
            return Err(AppError::AuthError(anyhow!("Invalid or unauthorized user")));
        }

        Ok(())
    }

    async fn resolve_user(&self, token: &str) -> Result<String, AppError> {
        let url = format!("{}/auth/v1/user", self.settings.url);

        let response = self
            .client
            .get(&url)
            .header("apikey", self.settings.service_key.expose_secret())
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Identity provider request failed: {}", e);
                AppError::AuthError(anyhow!("Invalid or unauthorized user"))
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Identity provider rejected token");
            return Err(AppError::AuthError(anyhow!("Invalid or unauthorized user")));
        }

        let user: ResolvedUser = response
            .json()
            .await
            .map_err(|_| AppError::AuthError(anyhow!("Invalid or unauthorized user")))?;

        Ok(user.id)
    }

    /// Best-effort profile lookup. Transport errors, rejections and missing
    /// rows all yield `None`: enrichment is optional and never blocks the
    /// request. Tolerant of duplicate rows (first one wins).
    pub async fn fetch_profile(&self, user_id: &str) -> Option<PatientProfile> {
        let url = format!(
            "{}/rest/v1/profiles?id=eq.{}&select=medical_history,allergies,current_medication",
            self.settings.url, user_id
        );

        let response = match self
            .client
            .get(&url)
            .header("apikey", self.settings.service_key.expose_secret())
            .bearer_auth(self.settings.service_key.expose_secret())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Profile lookup failed, skipping patient context: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(
                status = %response.status(),
                "Profile lookup rejected, skipping patient context"
            );
            return None;
        }

        match response.json::<Vec<PatientProfile>>().await {
            Ok(rows) => rows.into_iter().next(),
            Err(e) => {
                tracing::warn!("Failed to decode profile row, skipping patient context: {}", e);
                None
            }
        }
    }
}
