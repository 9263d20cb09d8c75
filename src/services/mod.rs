pub mod admin_service;
pub mod auth_service;
pub mod booking_service;
pub mod hotel_service;
pub mod profile_service;
pub mod review_service;
