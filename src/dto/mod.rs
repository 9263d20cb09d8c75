pub mod auth;
pub mod bookings;
pub mod hotels;
pub mod profile;
pub mod reviews;
