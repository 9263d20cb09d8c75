use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit,
    dto::profile::UpdateProfileRequest,
    entity::users::{ActiveModel as UserActive, Entity as Users, Model as UserModel},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<User>> {
    let account = find_account(state, user).await?;
    Ok(ApiResponse::success("Profile", user_from_entity(account), None))
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<User>> {
    let account = find_account(state, user).await?;
    if payload.is_empty() {
        return Ok(ApiResponse::success("Profile", user_from_entity(account), None));
    }

    let mut active: UserActive = account.into();
    if let Some(display_name) = payload.display_name {
        active.display_name = Set(non_empty(display_name));
    }
    if let Some(avatar_url) = payload.avatar_url {
        active.avatar_url = Set(non_empty(avatar_url));
    }
    if let Some(phone) = payload.phone {
        active.phone = Set(non_empty(phone));
    }

    let account = active.update(&state.orm).await?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "profile_update",
        "users",
        serde_json::json!({ "user_id": account.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Profile updated",
        user_from_entity(account),
        Some(Meta::empty()),
    ))
}

async fn find_account(state: &AppState, user: &AuthUser) -> AppResult<UserModel> {
    let account = Users::find_by_id(user.user_id).one(&state.orm).await?;
    match account {
        Some(u) => Ok(u),
        None => Err(AppError::NotFound),
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: model.role,
        display_name: model.display_name,
        avatar_url: model.avatar_url,
        phone: model.phone,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
