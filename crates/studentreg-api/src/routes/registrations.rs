//! # Registration Endpoints
//!
//! Accepts student registration submissions, validates them with
//! `studentreg-core`, and hands accepted records to the configured store.
//!
//! ## Endpoints
//!
//! - `POST /register`: form endpoint used by the registration page
//! - `POST /v1/registrations`: same contract for API clients
//! - `GET /v1/registrations/{id}`: read back a stored registration
//!
//! Any other method on the submission paths is answered with
//! "Invalid request method." before the body is read.

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::routing::{any, get};
use axum::{Json, Router};
use serde::Serialize;
use studentreg_core::{check_method, validate, NormalizedRegistration, RegistrationId};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::extract_submission;
use crate::state::AppState;
use crate::store::StoredRegistration;

/// Confirmation shown when the registration was written to durable storage.
pub const SAVED_MESSAGE: &str = "Registration successful! Your data has been saved.";

/// Confirmation shown when the registration is only held in memory.
pub const PROCESSED_MESSAGE: &str = "Registration successful! Your data has been processed.";

// ── Response DTOs ───────────────────────────────────────────────────

/// Successful registration response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    /// Always `true`.
    pub success: bool,
    /// Confirmation message, reflecting whether the record was persisted.
    pub message: String,
    /// Identifier assigned by the store.
    #[schema(value_type = Uuid)]
    pub registration_id: RegistrationId,
    /// The normalized registration, tagged with `studentType`.
    #[schema(value_type = Object)]
    pub registration: NormalizedRegistration,
}

/// Stored registration lookup response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoredRegistrationResponse {
    /// Always `true`.
    pub success: bool,
    /// The stored registration with its id and creation time.
    #[schema(value_type = Object)]
    pub registration: StoredRegistration,
}

// ── Router ──────────────────────────────────────────────────────────

/// Build the registrations router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", any(submit_registration))
        .route("/v1/registrations", any(submit_registration))
        .route("/v1/registrations/{id}", get(get_registration))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/registrations: Validate and store a registration.
#[utoipa::path(
    post,
    path = "/v1/registrations",
    responses(
        (status = 201, description = "Registration accepted", body = RegistrationResponse),
        (status = 400, description = "Unreadable request body", body = crate::error::ErrorBody),
        (status = 405, description = "Invalid request method", body = crate::error::ErrorBody),
        (status = 422, description = "Validation failed", body = crate::error::ErrorBody),
        (status = 500, description = "Database error", body = crate::error::ErrorBody),
    ),
    tag = "registrations"
)]
pub(crate) async fn submit_registration(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<RegistrationResponse>), AppError> {
    let delimiter = state.config.error_delimiter.as_str();

    check_method(request.method().as_str())
        .map_err(|err| AppError::from_rejection(err, delimiter))?;

    let raw = extract_submission(request, &state).await?;

    let registration = validate(&raw).map_err(|errors| {
        tracing::info!(error_count = errors.len(), "registration rejected");
        AppError::validation(&errors, delimiter)
    })?;

    let student_type = registration.student_type();
    let registration_id = state.store.save(&registration).await?;

    tracing::info!(
        registration_id = %registration_id,
        student_type = %student_type,
        courses = registration.courses.len(),
        "registration accepted"
    );

    let message = if state.store.is_durable() {
        SAVED_MESSAGE
    } else {
        PROCESSED_MESSAGE
    };

    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            success: true,
            message: message.to_string(),
            registration_id,
            registration,
        }),
    ))
}

/// GET /v1/registrations/{id}: Fetch a stored registration.
#[utoipa::path(
    get,
    path = "/v1/registrations/{id}",
    params(("id" = Uuid, Path, description = "Registration ID")),
    responses(
        (status = 200, description = "Registration found", body = StoredRegistrationResponse),
        (status = 400, description = "Malformed registration ID", body = crate::error::ErrorBody),
        (status = 404, description = "Registration not found", body = crate::error::ErrorBody),
    ),
    tag = "registrations"
)]
pub(crate) async fn get_registration(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StoredRegistrationResponse>, AppError> {
    let Path(id) = id.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let id = RegistrationId::from_uuid(id);

    let registration = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("registration {id}")))?;

    Ok(Json(StoredRegistrationResponse {
        success: true,
        registration,
    }))
}
