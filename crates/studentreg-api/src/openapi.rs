//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the registration API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student Registration API",
        version = "0.1.0",
        description = "Intake, validation, and storage of student registration forms for new and continuing students.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        crate::routes::registrations::submit_registration,
        crate::routes::registrations::get_registration,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::routes::registrations::RegistrationResponse,
        crate::routes::registrations::StoredRegistrationResponse,
    )),
    tags(
        (name = "registrations", description = "Student registration intake"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
///
/// Serves the OpenAPI JSON spec at `/openapi.json`.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
