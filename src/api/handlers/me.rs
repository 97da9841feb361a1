use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

use crate::api::AppState;

/// Identity behind the request token, without the password column.
#[utoipa::path(
    get,
    path = "/v1/me",
    params(
        ("Authorization" = String, Header, description = "Base64-encoded token, optionally prefixed with `Bearer`")
    ),
    responses(
        (status = 200, description = "Authenticated identity", content_type = "application/json"),
        (status = 401, description = "Missing, malformed or unknown token", body = String)
    ),
    tag = "auth"
)]
pub async fn me(headers: HeaderMap, state: Extension<Arc<AppState>>) -> impl IntoResponse {
    match state.tokens.require(&headers).await {
        Ok(identity) => (StatusCode::OK, Json(identity)).into_response(),
        Err(err) => err.into_response(),
    }
}
