use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    domain::search::HotelSearchParams,
    dto::{
        hotels::{HotelList, HotelSearchResult, Quote, QuoteQuery},
        reviews::{CreateReviewRequest, HotelReviews},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Hotel, Review},
    response::ApiResponse,
    services::{hotel_service, review_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_hotels))
        .route("/featured", get(featured_hotels))
        .route("/{id}", get(get_hotel))
        .route("/{id}/quote", get(quote))
        .route("/{id}/reviews", get(list_reviews).post(add_review))
}

#[utoipa::path(
    get,
    path = "/api/hotels",
    params(
        ("location" = Option<String>, Query, description = "Case-insensitive location substring"),
        ("startDate" = Option<String>, Query, description = "Requested check-in, echoed back"),
        ("endDate" = Option<String>, Query, description = "Requested check-out, echoed back"),
        ("guests" = Option<String>, Query, description = "Minimum room capacity"),
        ("priceMin" = Option<String>, Query, description = "Minimum nightly price, default 0"),
        ("priceMax" = Option<String>, Query, description = "Maximum nightly price, default unbounded"),
        ("rating" = Option<String>, Query, description = "Comma list of minimum ratings, any may match"),
        ("propertyType" = Option<String>, Query, description = "Comma list of property types"),
        ("amenities" = Option<String>, Query, description = "Comma list of amenities, all required"),
    ),
    responses(
        (status = 200, description = "Hotels matching every filter", body = ApiResponse<HotelSearchResult>)
    ),
    tag = "Hotels"
)]
pub async fn search_hotels(
    State(state): State<AppState>,
    Query(params): Query<HotelSearchParams>,
) -> AppResult<Json<ApiResponse<HotelSearchResult>>> {
    let resp = hotel_service::search_hotels(&state, params).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/hotels/featured",
    responses(
        (status = 200, description = "Top rated featured hotels", body = ApiResponse<HotelList>)
    ),
    tag = "Hotels"
)]
pub async fn featured_hotels(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<HotelList>>> {
    let resp = hotel_service::featured_hotels(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Hotel with rooms", body = ApiResponse<Hotel>),
        (status = 404, description = "Hotel not found"),
    ),
    tag = "Hotels"
)]
pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Hotel>>> {
    let resp = hotel_service::get_hotel(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/quote",
    params(
        ("id" = Uuid, Path, description = "Hotel ID"),
        ("room_id" = Option<Uuid>, Query, description = "Room ID, defaults to the first room"),
        ("check_in" = String, Query, description = "Check-in date, YYYY-MM-DD"),
        ("check_out" = String, Query, description = "Check-out date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Price breakdown for the stay", body = ApiResponse<Quote>),
        (status = 400, description = "Invalid dates or room"),
        (status = 404, description = "Hotel not found"),
    ),
    tag = "Hotels"
)]
pub async fn quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<Json<ApiResponse<Quote>>> {
    let resp = hotel_service::quote(&state, id, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/hotels/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    responses(
        (status = 200, description = "Reviews, newest first, with rating summary", body = ApiResponse<HotelReviews>),
        (status = 404, description = "Hotel not found"),
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<HotelReviews>>> {
    let resp = review_service::list_reviews(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/hotels/{id}/reviews",
    params(
        ("id" = Uuid, Path, description = "Hotel ID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review submitted", body = ApiResponse<Review>),
        (status = 400, description = "Invalid rating or empty comment"),
        (status = 401, description = "Login required"),
        (status = 404, description = "Hotel not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Reviews"
)]
pub async fn add_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<ApiResponse<Review>>> {
    let resp = review_service::add_review(&state, &user, id, payload).await?;
    Ok(Json(resp))
}
