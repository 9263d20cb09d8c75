//! Pure hotel search, stay pricing, review aggregation and booking status
//! rules. Nothing in here touches storage or request state.

pub mod booking;
pub mod pricing;
pub mod ratings;
pub mod search;
