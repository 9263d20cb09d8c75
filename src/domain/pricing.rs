use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{Hotel, Room};

pub const TAX_RATE_PERCENT: f64 = 12.0;

/// Check-in / check-out pair with check-out strictly after check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidStay {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl std::fmt::Display for InvalidStay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "check-out {} must be after check-in {}",
            self.check_out, self.check_in
        )
    }
}

impl Stay {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidStay> {
        if check_out <= check_in {
            return Err(InvalidStay {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        (self.check_out - self.check_in).num_days() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceBreakdown {
    pub unit_price: f64,
    pub nights: u32,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub display: PriceDisplay,
}

/// Two-decimal renderings of the breakdown amounts.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PriceDisplay {
    pub subtotal: String,
    pub tax: String,
    pub total: String,
}

pub fn price_for_nights(unit_price: f64, nights: u32) -> PriceBreakdown {
    let subtotal = unit_price * f64::from(nights);
    let tax = subtotal * TAX_RATE_PERCENT / 100.0;
    let total = subtotal + tax;

    PriceBreakdown {
        unit_price,
        nights,
        subtotal,
        tax,
        total,
        display: PriceDisplay {
            subtotal: format!("{subtotal:.2}"),
            tax: format!("{tax:.2}"),
            total: format!("{total:.2}"),
        },
    }
}

pub fn price_stay(unit_price: f64, stay: &Stay) -> PriceBreakdown {
    price_for_nights(unit_price, stay.nights())
}

#[derive(Debug, Clone, Copy)]
pub struct RoomSelection<'a> {
    pub room: Option<&'a Room>,
    pub unit_price: f64,
}

/// Resolves the nightly rate for a booking. Without an explicit room the
/// first room is used, and a hotel with no rooms is charged its base price.
/// Returns `None` when `room_id` does not belong to the hotel.
pub fn select_room(hotel: &Hotel, room_id: Option<Uuid>) -> Option<RoomSelection<'_>> {
    let room = match room_id {
        Some(id) => Some(hotel.find_room(id)?),
        None => hotel.rooms.first(),
    };
    Some(RoomSelection {
        room,
        unit_price: room.map_or(hotel.price, |r| r.price),
    })
}
