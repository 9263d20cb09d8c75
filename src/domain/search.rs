use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Hotel;

/// Raw query string of the hotel listing. Every field is kept as text so a
/// malformed number degrades to "no filter" instead of rejecting the request.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HotelSearchParams {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub guests: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub rating: Option<String>,
    pub property_type: Option<String>,
    pub amenities: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, ToSchema)]
pub struct SearchCriteria {
    /// Lowercased location needle.
    pub location: Option<String>,
    pub min_guests: Option<i64>,
    pub price_min: f64,
    /// `None` means unbounded.
    pub price_max: Option<f64>,
    pub ratings: Vec<f64>,
    pub property_types: Vec<String>,
    pub amenities: Vec<String>,
}

impl SearchCriteria {
    pub fn from_params(params: &HotelSearchParams) -> Self {
        let location = params
            .location
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let min_guests = params.guests.as_deref().and_then(parse_leading_int);
        let price_min = params
            .price_min
            .as_deref()
            .and_then(parse_leading_int)
            .map(|v| v as f64)
            .unwrap_or(0.0);
        let price_max = params
            .price_max
            .as_deref()
            .and_then(parse_leading_int)
            .map(|v| v as f64);

        let ratings = split_list(params.rating.as_deref())
            .filter_map(|token| token.parse::<f64>().ok())
            .filter(|r| r.is_finite())
            .collect();

        Self {
            location,
            min_guests,
            price_min,
            price_max,
            ratings,
            property_types: split_list(params.property_type.as_deref())
                .map(str::to_string)
                .collect(),
            amenities: split_list(params.amenities.as_deref())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == SearchCriteria::default()
    }

    pub fn matches(&self, hotel: &Hotel) -> bool {
        self.matches_location(hotel)
            && self.matches_guests(hotel)
            && self.matches_price(hotel)
            && self.matches_rating(hotel)
            && self.matches_property_type(hotel)
            && self.matches_amenities(hotel)
    }

    fn matches_location(&self, hotel: &Hotel) -> bool {
        match &self.location {
            Some(needle) => hotel.location.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }

    fn matches_guests(&self, hotel: &Hotel) -> bool {
        match self.min_guests {
            Some(guests) => i64::from(hotel.max_guests()) >= guests,
            None => true,
        }
    }

    fn matches_price(&self, hotel: &Hotel) -> bool {
        hotel.price >= self.price_min && self.price_max.is_none_or(|max| hotel.price <= max)
    }

    // any selected threshold is enough
    fn matches_rating(&self, hotel: &Hotel) -> bool {
        self.ratings.is_empty() || self.ratings.iter().any(|r| hotel.rating >= *r)
    }

    fn matches_property_type(&self, hotel: &Hotel) -> bool {
        self.property_types.is_empty() || self.property_types.contains(&hotel.property_type)
    }

    // every selected amenity is required
    fn matches_amenities(&self, hotel: &Hotel) -> bool {
        self.amenities
            .iter()
            .all(|amenity| hotel.amenities.contains(amenity))
    }
}

/// Keeps the hotels that satisfy every active criterion, in input order.
pub fn filter_hotels(hotels: Vec<Hotel>, criteria: &SearchCriteria) -> Vec<Hotel> {
    hotels
        .into_iter()
        .filter(|hotel| criteria.matches(hotel))
        .collect()
}

/// Reads an optional sign and the leading decimal digits, ignoring whatever
/// follows. Returns `None` when there are no leading digits.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }

    let value = rest[..digits].bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -value } else { value })
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
