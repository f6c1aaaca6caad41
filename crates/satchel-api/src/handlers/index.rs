use axum::Json;

use crate::context::OptionalCurrentUser;
use crate::dto::IndexResponse;

/// GET / - who is signed in, if anyone.
pub async fn index(OptionalCurrentUser(user): OptionalCurrentUser) -> Json<IndexResponse> {
    Json(IndexResponse { user })
}
