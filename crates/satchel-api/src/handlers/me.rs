//! Account endpoints for the signed-in user

use axum::{http::StatusCode, Extension, Json};

use satchel_core::{UpdatePasswordParams, User};

use crate::context::{CurrentUserId, SessionToken};
use crate::dto::{UpdatePasswordRequest, UpdateUsernameRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/me/
pub async fn get_me(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.auth.get_user_by_id(&user_id).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// PUT /api/v1/me/password/ and PUT /settings/auth/password/
///
/// Other sessions of the user may be revoked; the calling one is kept.
pub async fn update_password(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
    SessionToken(token): SessionToken,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    state
        .auth
        .update_password(UpdatePasswordParams {
            user_id,
            password: payload.password,
            keep_token: Some(token),
        })
        .await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::empty())))
}

/// PUT /api/v1/me/username/
pub async fn update_username(
    Extension(state): Extension<AppState>,
    CurrentUserId(user_id): CurrentUserId,
    ValidatedJson(payload): ValidatedJson<UpdateUsernameRequest>,
) -> Result<(StatusCode, Json<ApiResponse<()>>), ApiError> {
    state
        .auth
        .update_username(&user_id, &payload.username)
        .await?;
    Ok((StatusCode::ACCEPTED, Json(ApiResponse::empty())))
}
