//! Verification issue/check endpoints.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::verification::{IssuedVerification, RecordId, VerificationError};

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct GenerateVerificationRequest {
    pub id: Option<i64>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct IssuedVerificationResponse {
    pub id: i64,
    pub key: String,
    pub code: String,
    /// RFC 3339 issuance time.
    pub issued_at: String,
}

impl From<IssuedVerification> for IssuedVerificationResponse {
    fn from(issued: IssuedVerification) -> Self {
        Self {
            id: issued.id.0,
            key: issued.key,
            code: issued.code,
            issued_at: issued.issued_at.to_rfc3339(),
        }
    }
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct VerifyRequest {
    pub key: String,
    pub code: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct VerifiedResponse {
    pub id: i64,
}

#[utoipa::path(
    post,
    path = "/v1/verification",
    request_body = GenerateVerificationRequest,
    responses(
        (status = 201, description = "Verification issued", body = IssuedVerificationResponse),
        (status = 400, description = "Missing or unknown record identifier", body = String),
        (status = 500, description = "Verification data could not be stored", body = String)
    ),
    tag = "verification"
)]
pub async fn generate(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<GenerateVerificationRequest>>,
) -> impl IntoResponse {
    let request: GenerateVerificationRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match state.verification.generate(request.id.map(RecordId)).await {
        Ok(issued) => (
            StatusCode::CREATED,
            Json(IssuedVerificationResponse::from(issued)),
        )
            .into_response(),
        Err(VerificationError::MissingIdentifier) => (
            StatusCode::BAD_REQUEST,
            "Missing record identifier".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to generate verification: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Verification failed".to_string(),
            )
                .into_response()
        }
    }
}

/// Check a key/code pair. Every rejection gets the same response.
#[utoipa::path(
    post,
    path = "/v1/verification/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Pair is valid", body = VerifiedResponse),
        (status = 400, description = "Invalid or expired pair", body = String),
        (status = 500, description = "Lookup failed", body = String)
    ),
    tag = "verification"
)]
pub async fn verify(
    state: Extension<Arc<AppState>>,
    payload: Option<Json<VerifyRequest>>,
) -> impl IntoResponse {
    let request: VerifyRequest = match payload {
        Some(Json(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    match state
        .verification
        .verify(&request.key, &request.code)
        .await
    {
        Ok(Some(record)) => (
            StatusCode::OK,
            Json(VerifiedResponse { id: record.id.0 }),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::BAD_REQUEST,
            "Invalid verification".to_string(),
        )
            .into_response(),
        Err(err) => {
            error!("Failed to verify: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Verification failed".to_string(),
            )
                .into_response()
        }
    }
}
