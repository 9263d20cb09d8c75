use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::{pricing::PriceBreakdown, search::SearchCriteria},
    models::Hotel,
};

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RoomInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub bed_type: String,
    #[serde(default)]
    pub size: i32,
    #[serde(default)]
    pub view: String,
    #[serde(default)]
    pub image: String,
}

fn default_capacity() -> i32 {
    2
}

fn default_property_type() -> String {
    "hotel".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateHotelRequest {
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub discount: Option<i32>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub review_count: i32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default = "default_property_type")]
    pub property_type: String,
    #[serde(default)]
    pub rooms: Vec<RoomInput>,
    #[serde(default)]
    pub featured: bool,
}

// Present-but-null becomes `Some(None)`; an absent field stays `None` via `default`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Absent fields are left untouched; `rooms`, when present, replaces every room.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateHotelRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// `null` clears the field.
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub original_price: Option<Option<f64>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub discount: Option<Option<i32>>,
    pub rating: Option<f64>,
    pub review_count: Option<i32>,
    pub images: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    pub property_type: Option<String>,
    pub rooms: Option<Vec<RoomInput>>,
    pub featured: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct HotelList {
    #[schema(value_type = Vec<Hotel>)]
    pub items: Vec<Hotel>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelSearchResult {
    pub criteria: SearchCriteria,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub items: Vec<Hotel>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteQuery {
    pub room_id: Option<Uuid>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Quote {
    pub hotel_id: Uuid,
    pub room_id: Option<Uuid>,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub price: PriceBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discount_can_be_cleared_or_left_alone() {
        let absent: UpdateHotelRequest = serde_json::from_str(r#"{"name":"Harbor Inn"}"#).unwrap();
        assert_eq!(absent.discount, None);
        assert_eq!(absent.original_price, None);

        let cleared: UpdateHotelRequest =
            serde_json::from_str(r#"{"discount":null,"original_price":null}"#).unwrap();
        assert_eq!(cleared.discount, Some(None));
        assert_eq!(cleared.original_price, Some(None));

        let set: UpdateHotelRequest =
            serde_json::from_str(r#"{"discount":15,"original_price":289.0}"#).unwrap();
        assert_eq!(set.discount, Some(Some(15)));
        assert_eq!(set.original_price, Some(Some(289.0)));
    }
}
