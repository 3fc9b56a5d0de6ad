//! Common test utilities for driving the router against mocked upstreams.

use analysis_service::config::{
    CorsSettings, IdentitySettings, MediaSettings, OpenAiSettings, ServerSettings, Settings,
};
use analysis_service::startup::{build_router, build_state};
use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use secrecy::Secret;

/// Settings pointing every external service at a test-controlled base URL.
pub fn test_settings(identity_url: &str, openai_url: &str, media_url: &str) -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        cors: CorsSettings {
            allowed_origin: "http://localhost:8080".to_string(),
        },
        identity: IdentitySettings {
            url: identity_url.to_string(),
            service_key: Secret::new("test-service-key".to_string()),
        },
        openai: OpenAiSettings {
            base_url: openai_url.to_string(),
            api_key: Secret::new("test-api-key".to_string()),
            model: "gpt-4o-mini".to_string(),
        },
        media: MediaSettings {
            base_url: media_url.to_string(),
            cloud_name: "test-cloud".to_string(),
            api_key: "test-media-key".to_string(),
            api_secret: Secret::new("test-media-secret".to_string()),
            folder: "notes_images".to_string(),
        },
    }
}

pub fn test_app(settings: &Settings) -> Router {
    let state = build_state(settings);
    build_router(settings, state)
}

pub fn analysis_request(body: serde_json::Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/ai-analysis")
        .header("content-type", "application/json");

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a multipart request for POST /reports with a single form field.
pub fn report_request(field_name: &str, contents: &[u8]) -> Request<Body> {
    let boundary = "test-boundary-7MA4YWxkTrZu0gW";

    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"report.png\"\r\n\
             Content-Type: image/png\r\n\r\n",
            field_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/reports")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();

    serde_json::from_slice(&body).expect("Response body was not valid JSON")
}
