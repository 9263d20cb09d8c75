use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{domain::booking::BookingStatus, models::Booking};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub hotel_id: Uuid,
    /// Defaults to the hotel's first room.
    pub room_id: Option<Uuid>,
    pub guests: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct BookingList {
    #[schema(value_type = Vec<Booking>)]
    pub items: Vec<Booking>,
}
