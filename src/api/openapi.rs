use utoipa::OpenApi;

use super::handlers::{health, me, verification};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        verification::generate,
        verification::verify,
        me::me,
    ),
    components(schemas(
        health::Health,
        verification::GenerateVerificationRequest,
        verification::IssuedVerificationResponse,
        verification::VerifyRequest,
        verification::VerifiedResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "verification", description = "Expiring verification key/code pairs"),
        (name = "auth", description = "Header token authentication"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
