mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{test_app, test_settings};
use tower::util::ServiceExt;

#[tokio::test]
async fn health_check_works() {
    // Clients are constructed lazily; no external service needs to be up.
    let settings = test_settings(
        "http://localhost:54321",
        "http://localhost:54322",
        "http://localhost:54323",
    );
    let app = test_app(&settings);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
