use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::{Request, StatusCode},
};
use hotel_booking_api::{
    app::build_router,
    db::create_lazy_pool,
    routes::health::health_check,
    state::AppState,
};
use tower::ServiceExt;

fn offline_state() -> AppState {
    let pool = create_lazy_pool("postgres://postgres@127.0.0.1:1/unused").expect("lazy pool");
    AppState::new(pool, "test-secret")
}

#[tokio::test]
async fn health_check_reports_database_down() {
    let response = health_check(State(offline_state())).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "down");
    assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_route_answers_with_request_id() {
    let app = build_router(offline_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], "abc-123");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["data"]["status"], "ok");
}
