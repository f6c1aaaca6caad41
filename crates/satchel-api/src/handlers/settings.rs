//! Settings area. Password changes reuse [`me::update_password`](super::me::update_password).

use axum::{extract::Path, http::StatusCode, Extension, Json};
use tracing::warn;

use satchel_core::{CreateUserParams, User};

use crate::context::CurrentUserId;
use crate::dto::{CreateUserRequest, SettingsResponse, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

async fn require_admin(state: &AppState, user_id: &str) -> Result<User, ApiError> {
    let user = state.auth.get_user_by_id(user_id).await?;
    if !user.is_admin() {
        warn!("Non-admin user {} tried to manage users", user_id);
        return Err(ApiError::Forbidden("admin role required".into()));
    }
    Ok(user)
}

/// GET /settings/
pub async fn settings_page(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
) -> Result<Json<ApiResponse<SettingsResponse>>, ApiError> {
    let user = state.auth.get_user_by_id(&user_id).await?;
    let users = if user.is_admin() {
        Some(state.auth.list_users().await?)
    } else {
        None
    };
    Ok(Json(ApiResponse::success(SettingsResponse { user, users })))
}

/// GET /settings/auth/users/
pub async fn list_users(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
) -> Result<Json<ApiResponse<Vec<User>>>, ApiError> {
    require_admin(&state, &user_id).await?;
    let users = state.auth.list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// POST /settings/auth/users/
pub async fn create_user(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    require_admin(&state, &user_id).await?;
    let params = CreateUserParams::new(payload.username, payload.password)
        .with_role(payload.role.unwrap_or_default());
    let user = state.auth.create_user(params).await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::success(user))))
}

/// DELETE /settings/auth/users/{user_id}/
pub async fn delete_user(
    Extension(state): Extension<AppState>,
    CurrentUserId(actor_id): CurrentUserId,
    Path(user_id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    require_admin(&state, &actor_id).await?;
    let target = state.auth.get_user_by_id(&user_id).await?;
    if !target.is_deletable_by(&actor_id) {
        return Err(ApiError::BadRequest("you cannot delete your own account".into()));
    }
    state.auth.delete_user_by_id(&target.id).await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::empty())))
}
