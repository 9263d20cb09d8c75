use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    domain::booking::BookingStatus,
    dto::bookings::{BookingList, UpdateBookingStatusRequest},
    entity::bookings::{Column as BookingCol, Entity as Bookings},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Booking,
    response::{ApiResponse, Meta},
    routes::params::{BookingListQuery, SortOrder},
    services::booking_service::{apply_status, booking_from_entity},
    state::AppState,
};

pub async fn list_all_bookings(
    state: &AppState,
    user: &AuthUser,
    query: BookingListQuery,
) -> AppResult<ApiResponse<BookingList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
        let status = status
            .parse::<BookingStatus>()
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        condition = condition.add(BookingCol::Status.eq(status.as_str()));
    }

    let mut finder = Bookings::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(BookingCol::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(BookingCol::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Bookings", BookingList { items }, Some(meta)))
}

pub async fn update_booking_status(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateBookingStatusRequest,
) -> AppResult<ApiResponse<Booking>> {
    ensure_admin(user)?;
    let booking = Bookings::find_by_id(id).one(&state.orm).await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let booking = apply_status(state, user, booking, payload.status).await?;
    Ok(ApiResponse::success("Updated", booking, Some(Meta::empty())))
}
