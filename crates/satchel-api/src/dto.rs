//! Request payloads and the validating JSON extractor

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use validator::Validate;

use satchel_core::{Role, User};

use crate::error::ApiError;

/// `Json<T>` that answers malformed bodies and failed validation with `400`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(Self(value))
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[serde(alias = "userName")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsernameRequest {
    #[serde(alias = "userName")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(alias = "userName")]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub user: Option<User>,
}

#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    pub user: User,
    /// Present for admins only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
