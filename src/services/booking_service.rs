use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    domain::{
        booking::BookingStatus,
        pricing::{Stay, price_stay, select_room},
    },
    dto::bookings::{BookingList, CreateBookingRequest},
    entity::{
        bookings::{ActiveModel as BookingActive, Column as BookingCol, Entity as Bookings, Model as BookingModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Booking,
    response::{ApiResponse, Meta},
    services::hotel_service::load_hotel,
    state::AppState,
};

/// Records a paid reservation. Payment itself happens upstream, so new
/// bookings start out confirmed.
pub async fn create_booking(
    state: &AppState,
    user: &AuthUser,
    payload: CreateBookingRequest,
) -> AppResult<ApiResponse<Booking>> {
    if payload.guests < 1 {
        return Err(AppError::BadRequest("guests must be at least 1".into()));
    }
    let stay = Stay::new(payload.check_in, payload.check_out)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let hotel = load_hotel(&state.orm, payload.hotel_id).await?;
    let selection = select_room(&hotel, payload.room_id)
        .ok_or_else(|| AppError::BadRequest("Room not found for this hotel".into()))?;
    if let Some(room) = selection.room.filter(|room| payload.guests > room.capacity) {
        return Err(AppError::BadRequest(format!(
            "{} sleeps at most {} guests",
            room.name, room.capacity
        )));
    }

    let account = Users::find_by_id(user.user_id).one(&state.orm).await?;
    let account = match account {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Unknown user".into())),
    };

    let price = price_stay(selection.unit_price, &stay);

    let booking = BookingActive {
        id: Set(Uuid::new_v4()),
        hotel_id: Set(Some(hotel.id)),
        hotel_name: Set(hotel.name.clone()),
        room_id: Set(selection.room.map(|r| r.id)),
        room_name: Set(selection.room.map(|r| r.name.clone()).unwrap_or_default()),
        user_id: Set(account.id),
        user_name: Set(account.display_name.unwrap_or_default()),
        user_email: Set(account.email),
        guests: Set(payload.guests),
        price: Set(price.unit_price),
        check_in: Set(stay.check_in()),
        check_out: Set(stay.check_out()),
        nights: Set(price.nights as i32),
        subtotal: Set(price.subtotal),
        tax: Set(price.tax),
        total: Set(price.total),
        status: Set(BookingStatus::Confirmed.as_str().to_string()),
        created_at: NotSet,
        updated_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(
        booking_id = %booking.id,
        hotel_id = %hotel.id,
        nights = booking.nights,
        total = booking.total,
        "booking created"
    );

    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_create",
        "bookings",
        serde_json::json!({ "booking_id": booking.id, "hotel_id": hotel.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Booking confirmed",
        booking_from_entity(booking)?,
        Some(Meta::empty()),
    ))
}

pub async fn list_user_bookings(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<BookingList>> {
    let items = Bookings::find()
        .filter(BookingCol::UserId.eq(user.user_id))
        .order_by_desc(BookingCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(booking_from_entity)
        .collect::<AppResult<Vec<_>>>()?;

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Bookings", BookingList { items }, Some(meta)))
}

pub async fn cancel_booking(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Booking>> {
    let booking = Bookings::find()
        .filter(
            Condition::all()
                .add(BookingCol::UserId.eq(user.user_id))
                .add(BookingCol::Id.eq(id)),
        )
        .one(&state.orm)
        .await?;
    let booking = match booking {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };

    let booking = apply_status(state, user, booking, BookingStatus::Cancelled).await?;
    Ok(ApiResponse::success("Booking cancelled", booking, Some(Meta::empty())))
}

pub(crate) async fn apply_status(
    state: &AppState,
    user: &AuthUser,
    booking: BookingModel,
    next: BookingStatus,
) -> AppResult<Booking> {
    let current = parse_status(&booking)?;
    let next = current
        .transition(next)
        .map_err(|err| AppError::BadRequest(err.to_string()))?;

    let mut active: BookingActive = booking.into();
    active.status = Set(next.as_str().to_string());
    active.updated_at = Set(Utc::now().into());
    let booking = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "booking_status_update",
        "bookings",
        serde_json::json!({
            "booking_id": booking.id,
            "from": current.as_str(),
            "to": next.as_str(),
        }),
    )
    .await;

    booking_from_entity(booking)
}

fn parse_status(model: &BookingModel) -> AppResult<BookingStatus> {
    model.status.parse::<BookingStatus>().map_err(|err| {
        AppError::Internal(anyhow::anyhow!("booking {}: {}", model.id, err))
    })
}

pub(crate) fn booking_from_entity(model: BookingModel) -> AppResult<Booking> {
    let status = parse_status(&model)?;
    Ok(Booking {
        id: model.id,
        hotel_id: model.hotel_id,
        hotel_name: model.hotel_name,
        room_id: model.room_id,
        room_name: model.room_name,
        user_id: model.user_id,
        user_name: model.user_name,
        user_email: model.user_email,
        guests: model.guests,
        price: model.price,
        check_in: model.check_in,
        check_out: model.check_out,
        nights: model.nights,
        subtotal: model.subtotal,
        tax: model.tax,
        total: model.total,
        status,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}
