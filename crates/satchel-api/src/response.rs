//! JSON envelope shared by every API response

use chrono::Utc;
use serde::Serialize;

/// `{ "success", "data", "error", "timestamp" }`. Exactly one of `data` and
/// `error` is set, except for [`ApiResponse::empty`] where neither is.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorBody>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Stable, machine-readable, e.g. `UNAUTHORIZED`.
    pub code: &'static str,
    pub message: String,
}

impl<T: Serialize> ApiResponse<T> {
    fn build(data: Option<T>, error: Option<ErrorBody>) -> Self {
        Self {
            success: error.is_none(),
            data,
            error,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn success(data: T) -> Self {
        Self::build(Some(data), None)
    }
}

impl ApiResponse<()> {
    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        Self::build(
            None,
            Some(ErrorBody {
                code,
                message: message.into(),
            }),
        )
    }

    /// Success without a payload (`"data": null`).
    pub fn empty() -> Self {
        Self::build(None, None)
    }
}
