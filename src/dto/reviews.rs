use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{domain::ratings::ReviewSummary, models::Review};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HotelReviews {
    pub summary: ReviewSummary,
    pub items: Vec<Review>,
}
