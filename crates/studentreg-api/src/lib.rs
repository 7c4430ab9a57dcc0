//! # studentreg-api: Student Registration Service
//!
//! Serves the student registration form contract over HTTP. Submissions are
//! accepted as HTML form posts or JSON, validated by `studentreg-core`, and
//! handed to a [`store::RegistrationStore`] once they pass.
//!
//! ## API Surface
//!
//! | Route                        | Module                      |
//! |------------------------------|-----------------------------|
//! | `/register`                  | [`routes::registrations`]   |
//! | `/v1/registrations`          | [`routes::registrations`]   |
//! | `/v1/registrations/{id}`     | [`routes::registrations`]   |
//! | `/openapi.json`              | [`openapi`]                 |
//! | `/health/*`                  | probes                      |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → DefaultBodyLimit → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_body_bytes);

    let api = Router::new()
        .merge(routes::registrations::router())
        .merge(openapi::router())
        .layer(body_limit)
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(middleware::tracing_layer::layer())
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
