use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::booking::BookingStatus;

#[derive(Debug, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Hotel {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    pub rating: f64,
    pub review_count: i32,
    pub images: Vec<String>,
    pub amenities: Vec<String>,
    pub property_type: String,
    pub rooms: Vec<Room>,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Largest room capacity, or 0 for a hotel without rooms.
    pub fn max_guests(&self) -> i32 {
        self.rooms.iter().map(|room| room.capacity).max().unwrap_or(0).max(0)
    }

    pub fn find_room(&self, room_id: Uuid) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    pub capacity: i32,
    pub bed_type: String,
    pub size: i32,
    pub view: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Review {
    pub id: Uuid,
    pub hotel_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Booking {
    pub id: Uuid,
    /// Cleared when the hotel is deleted; `hotel_name` keeps the snapshot.
    pub hotel_id: Option<Uuid>,
    pub hotel_name: String,
    pub room_id: Option<Uuid>,
    pub room_name: String,
    pub user_id: Uuid,
    pub user_name: String,
    pub user_email: String,
    pub guests: i32,
    pub price: f64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i32,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
