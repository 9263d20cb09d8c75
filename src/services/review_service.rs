use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::{
    audit,
    domain::ratings::summarize,
    dto::reviews::{CreateReviewRequest, HotelReviews},
    entity::{
        hotels::Entity as Hotels,
        reviews::{ActiveModel as ReviewActive, Column as ReviewCol, Entity as Reviews, Model as ReviewModel},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Review,
    response::{ApiResponse, Meta},
    state::AppState,
};

const ANONYMOUS: &str = "Anonymous";

pub async fn list_reviews(
    state: &AppState,
    hotel_id: Uuid,
) -> AppResult<ApiResponse<HotelReviews>> {
    ensure_hotel_exists(state, hotel_id).await?;

    let items: Vec<Review> = Reviews::find()
        .filter(ReviewCol::HotelId.eq(hotel_id))
        .order_by_desc(ReviewCol::CreatedAt)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(review_from_entity)
        .collect();

    let summary = summarize(&items);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Reviews",
        HotelReviews { summary, items },
        Some(meta),
    ))
}

pub async fn add_review(
    state: &AppState,
    user: &AuthUser,
    hotel_id: Uuid,
    payload: CreateReviewRequest,
) -> AppResult<ApiResponse<Review>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest("rating must be between 1 and 5".into()));
    }
    let comment = payload.comment.trim();
    if comment.is_empty() {
        return Err(AppError::BadRequest("Please enter your review".into()));
    }

    ensure_hotel_exists(state, hotel_id).await?;

    let author = Users::find_by_id(user.user_id).one(&state.orm).await?;
    let author = match author {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Unknown user".into())),
    };

    let review = ReviewActive {
        id: Set(Uuid::new_v4()),
        hotel_id: Set(hotel_id),
        user_id: Set(author.id),
        user_name: Set(author
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS.to_string())),
        user_avatar: Set(author.avatar_url.unwrap_or_default()),
        rating: Set(payload.rating),
        comment: Set(comment.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "review_create",
        "reviews",
        serde_json::json!({ "review_id": review.id, "hotel_id": hotel_id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Review submitted",
        review_from_entity(review),
        Some(Meta::empty()),
    ))
}

async fn ensure_hotel_exists(state: &AppState, hotel_id: Uuid) -> AppResult<()> {
    let found = Hotels::find_by_id(hotel_id).count(&state.orm).await?;
    if found == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

fn review_from_entity(model: ReviewModel) -> Review {
    Review {
        id: model.id,
        hotel_id: model.hotel_id,
        user_id: model.user_id,
        user_name: model.user_name,
        user_avatar: model.user_avatar,
        rating: model.rating,
        comment: model.comment,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
