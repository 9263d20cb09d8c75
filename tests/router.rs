use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use hotel_booking_api::{
    app::build_router,
    db::create_lazy_pool,
    middleware::auth::{ROLE_ADMIN, ROLE_USER},
    services::auth_service::issue_token,
    state::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "router-test-secret";

// Requests in this file are rejected before any query runs, so the pool
// never has to connect.
fn app() -> Router {
    let pool = create_lazy_pool("postgres://postgres@127.0.0.1:1/unused").unwrap();
    build_router(AppState::new(pool, SECRET))
}

fn bearer(role: &str) -> String {
    let token = issue_token(Uuid::new_v4(), role, SECRET).unwrap();
    format!("Bearer {token}")
}

async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn hotel_payload() -> String {
    serde_json::json!({
        "name": "Harbor Inn",
        "location": "Portland, ME",
        "price": 180.0,
    })
    .to_string()
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let (status, json) = send(
        Request::builder()
            .uri("/api/nowhere")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["data"]["path"], "/api/nowhere");
}

#[tokio::test]
async fn booking_requires_a_token() {
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let (status, _) = send(
        Request::builder()
            .uri("/api/bookings")
            .header(header::AUTHORIZATION, "Token abc")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() {
    let token = issue_token(Uuid::new_v4(), ROLE_USER, "some-other-secret").unwrap();
    let (status, _) = send(
        Request::builder()
            .uri("/api/profile")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn regular_user_cannot_create_hotels() {
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/admin/hotels")
            .header(header::AUTHORIZATION, bearer(ROLE_USER))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(hotel_payload()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn regular_user_cannot_list_all_bookings() {
    let (status, _) = send(
        Request::builder()
            .uri("/api/admin/bookings")
            .header(header::AUTHORIZATION, bearer(ROLE_USER))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_hotel_needs_name_and_location() {
    let payload = serde_json::json!({ "name": "  ", "location": "Nowhere", "price": 10.0 });
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/admin/hotels")
            .header(header::AUTHORIZATION, bearer(ROLE_ADMIN))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quote_rejects_checkout_before_checkin() {
    let uri = format!(
        "/api/hotels/{}/quote?check_in=2025-06-10&check_out=2025-06-10",
        Uuid::new_v4()
    );
    let (status, json) = send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        json["message"]
            .as_str()
            .unwrap()
            .contains("must be after check-in")
    );
}

#[tokio::test]
async fn booking_with_zero_guests_is_rejected() {
    let payload = serde_json::json!({
        "hotel_id": Uuid::new_v4(),
        "guests": 0,
        "check_in": "2025-06-10",
        "check_out": "2025-06-12",
    });
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri("/api/bookings")
            .header(header::AUTHORIZATION, bearer(ROLE_USER))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn review_rating_out_of_range_is_rejected() {
    let uri = format!("/api/hotels/{}/reviews", Uuid::new_v4());
    let payload = serde_json::json!({ "rating": 6, "comment": "Lovely" });
    let (status, _) = send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(ROLE_USER))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn docs_are_served() {
    let response = app()
        .oneshot(Request::builder().uri("/docs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
