//! Per-request identity
//!
//! Auth middleware stores these in the request's extensions; handlers read
//! them back through the extractors below. Extensions belong to a single
//! request, so nothing leaks between requests.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use satchel_core::User;

use crate::error::ApiError;

/// Id of the user owning the verified session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUserId(pub String);

/// Full record of the signed-in user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// [`CurrentUser`] when one was resolved, `None` otherwise.
#[derive(Debug, Clone)]
pub struct OptionalCurrentUser(pub Option<User>);

/// Token of the verified session that authenticated this request.
#[derive(Debug, Clone)]
pub struct SessionToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUserId {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUserId>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no authenticated user".into()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no authenticated user".into()))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for OptionalCurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(
            parts
                .extensions
                .get::<CurrentUser>()
                .map(|CurrentUser(user)| user.clone()),
        ))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionToken>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("no session".into()))
    }
}
