//! Sign-in and sign-out, for API clients and for browsers

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use tracing::info;

use crate::dto::{SignInRequest, ValidatedJson};
use crate::error::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Where browser sign-in and sign-out land.
pub const INDEX_PATH: &str = "/";

/// POST /api/v1/signin/ - `202` with the session cookie and the user.
pub async fn sign_in(
    Extension(state): Extension<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .auth
        .sign_in(&payload.username, &payload.password)
        .await?;
    let cookie = state.cookie.issue(&result.session)?;

    Ok((
        StatusCode::ACCEPTED,
        [(header::SET_COOKIE, cookie)],
        Json(ApiResponse::success(result.user)),
    ))
}

/// GET|POST /api/v1/signout/ - always `200`, clears the cookie.
pub async fn sign_out(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    end_session(&state, &headers).await?;
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.cookie.clear()?)],
        Json(ApiResponse::empty()),
    ))
}

/// POST /signin/ - redirects to the index on success.
pub async fn sign_in_redirect(
    Extension(state): Extension<AppState>,
    ValidatedJson(payload): ValidatedJson<SignInRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .auth
        .sign_in(&payload.username, &payload.password)
        .await?;
    let cookie = state.cookie.issue(&result.session)?;

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(INDEX_PATH)))
}

/// POST /signout/ - clears the cookie and redirects to the index.
pub async fn sign_out_redirect(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    end_session(&state, &headers).await?;
    Ok((
        [(header::SET_COOKIE, state.cookie.clear()?)],
        Redirect::to(INDEX_PATH),
    ))
}

async fn end_session(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    if let Some(token) = state.cookie.extract(headers) {
        state.auth.sign_out(token).await?;
        info!("Session ended");
    }
    Ok(())
}
