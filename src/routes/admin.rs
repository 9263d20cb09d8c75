use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
};
use uuid::Uuid;

use crate::{
    dto::{
        bookings::{BookingList, UpdateBookingStatusRequest},
        hotels::{CreateHotelRequest, UpdateHotelRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Booking, Hotel},
    response::ApiResponse,
    routes::params::BookingListQuery,
    services::{admin_service, hotel_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hotels", post(create_hotel))
        .route("/hotels/{id}", put(update_hotel).delete(delete_hotel))
        .route("/bookings", get(list_all_bookings))
        .route("/bookings/{id}/status", patch(update_booking_status))
}

#[utoipa::path(
    post,
    path = "/api/admin/hotels",
    request_body = CreateHotelRequest,
    responses(
        (status = 200, description = "Hotel created", body = ApiResponse<Hotel>),
        (status = 400, description = "Missing name or location"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateHotelRequest>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let resp = hotel_service::create_hotel(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/hotels/{id}",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = UpdateHotelRequest,
    responses(
        (status = 200, description = "Hotel updated", body = ApiResponse<Hotel>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateHotelRequest>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let resp = hotel_service::update_hotel(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/hotels/{id}",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel deleted"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_hotel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = hotel_service::delete_hotel(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/bookings",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "All bookings (admin only)", body = ApiResponse<BookingList>),
        (status = 400, description = "Unknown status"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<ApiResponse<BookingList>>> {
    let resp = admin_service::list_all_bookings(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/bookings/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingStatusRequest,
    responses(
        (status = 200, description = "Booking status changed", body = ApiResponse<Booking>),
        (status = 400, description = "Transition not allowed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Booking not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_booking_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let resp = admin_service::update_booking_status(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
