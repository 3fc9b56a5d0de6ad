pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use services::{completion::CompletionClient, identity::IdentityClient, media::MediaClient};
use std::sync::Arc;

/// Shared application state containing the external-service clients
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityClient>,
    pub completion: Arc<CompletionClient>,
    pub media: Arc<MediaClient>,
}

impl AppState {
    pub fn new(
        identity: Arc<IdentityClient>,
        completion: Arc<CompletionClient>,
        media: Arc<MediaClient>,
    ) -> Self {
        Self {
            identity,
            completion,
            media,
        }
    }
}
