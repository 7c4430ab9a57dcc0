//! # Submission Extraction
//!
//! Reads a [`RawSubmission`] from a request body. HTML forms post
//! `application/x-www-form-urlencoded` (with repeated `courseSelection[]`
//! keys); API clients post `application/json`. Both decode into the same
//! type, mapping decode failures to [`AppError::BadRequest`].

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use axum_extra::extract::Form;
use studentreg_core::RawSubmission;

use crate::error::AppError;

/// Body encodings accepted by the registration endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/json` (and `+json` suffixes).
    Json,
    /// `application/x-www-form-urlencoded`.
    Form,
    /// No `Content-Type` header.
    Missing,
    /// Anything else.
    Unsupported,
}

impl BodyKind {
    /// Classify a `Content-Type` header value.
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        let Some(value) = content_type else {
            return Self::Missing;
        };
        let essence = value
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/json" || essence.ends_with("+json") {
            Self::Json
        } else if essence == "application/x-www-form-urlencoded" {
            Self::Form
        } else {
            Self::Unsupported
        }
    }
}

/// Extract a registration submission from the request body.
///
/// A request with no `Content-Type` and an empty body is treated as an empty
/// submission, so that it is reported field by field rather than rejected.
pub async fn extract_submission<S>(request: Request, state: &S) -> Result<RawSubmission, AppError>
where
    S: Send + Sync,
{
    let kind = BodyKind::from_content_type(
        request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
    );

    match kind {
        BodyKind::Json => Json::<RawSubmission>::from_request(request, state)
            .await
            .map(|Json(raw)| raw)
            .map_err(|err| AppError::BadRequest(err.body_text())),
        BodyKind::Form => Form::<RawSubmission>::from_request(request, state)
            .await
            .map(|Form(raw)| raw)
            .map_err(|err| AppError::BadRequest(err.to_string())),
        BodyKind::Missing => {
            let bytes = Bytes::from_request(request, state)
                .await
                .map_err(|err| AppError::BadRequest(err.body_text()))?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                Ok(RawSubmission::default())
            } else {
                Err(AppError::BadRequest("missing Content-Type header".to_string()))
            }
        }
        BodyKind::Unsupported => Err(AppError::BadRequest(
            "expected application/x-www-form-urlencoded or application/json".to_string(),
        )),
    }
}
