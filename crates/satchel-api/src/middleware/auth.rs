//! Session gating
//!
//! Three variants share the same detection (cookie present, well formed,
//! session exists and has not expired) and differ only in what happens when
//! it fails.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::debug;

use satchel_core::{DomainError, Session};

use crate::context::{CurrentUser, CurrentUserId, SessionToken};
use crate::state::AppState;

/// State for [`require_session_or_redirect`].
#[derive(Clone)]
pub struct RedirectGuard {
    pub state: AppState,
    pub redirect_to: String,
}

impl RedirectGuard {
    pub fn new(state: AppState, redirect_to: impl Into<String>) -> Self {
        Self {
            state,
            redirect_to: redirect_to.into(),
        }
    }
}

async fn verified_session(state: &AppState, headers: &HeaderMap) -> Result<Session, DomainError> {
    let token = state
        .cookie
        .extract(headers)
        .ok_or(DomainError::SessionNotFound)?;
    state.auth.verify_token(token).await
}

fn attach_session(request: &mut Request, session: Session) {
    request
        .extensions_mut()
        .insert(CurrentUserId(session.user_id));
    request.extensions_mut().insert(SessionToken(session.token));
}

/// Rejects with an empty `401` when there is no valid session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = verified_session(&state, request.headers()).await;
    match verified {
        Ok(session) => {
            attach_session(&mut request, session);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %request.uri().path(), reason = %e, "session required");
            StatusCode::UNAUTHORIZED.into_response()
        }
    }
}

/// Redirects with `303 See Other` when there is no valid session.
pub async fn require_session_or_redirect(
    State(guard): State<RedirectGuard>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = verified_session(&guard.state, request.headers()).await;
    match verified {
        Ok(session) => {
            attach_session(&mut request, session);
            next.run(request).await
        }
        Err(e) => {
            debug!(path = %request.uri().path(), reason = %e, "session required, redirecting");
            Redirect::to(&guard.redirect_to).into_response()
        }
    }
}

/// Attaches the signed-in user when possible and always continues.
pub async fn load_current_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let verified = verified_session(&state, request.headers()).await;
    if let Ok(session) = verified {
        match state.auth.get_user_by_id(&session.user_id).await {
            Ok(user) => {
                request.extensions_mut().insert(CurrentUser(user));
                attach_session(&mut request, session);
            }
            Err(e) => debug!(user_id = %session.user_id, reason = %e, "session user not loaded"),
        }
    }
    next.run(request).await
}
