//! # Integration Tests for studentreg-api
//!
//! Drives the assembled router with `tower::ServiceExt::oneshot`: health
//! probes, form and JSON intake, validation envelopes, method handling,
//! storage failures, read-back, and OpenAPI generation.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use studentreg_api::state::{AppConfig, AppState};
use studentreg_api::store::memory::MemoryRegistrationStore;
use studentreg_api::store::{PersistenceError, RegistrationStore, StoredRegistration};
use studentreg_core::{NormalizedRegistration, RegistrationId};

const NEW_STUDENT_FORM: &str = "fullName=Ada+Obi&program=Computer+Science&email=ada%40example.com\
&phoneNumber=0801234567&courseSelection%5B%5D=CS101&courseSelection%5B%5D=MA%3C101%3E\
&duesPaid=on&admissionYear=2024&previousSchool=Kings+College";

const EMPTY_SUBMISSION_MESSAGES: [&str; 7] = [
    "Full Name is required.",
    "Program of Study is required.",
    "A valid Email Address is required.",
    "Phone Number is required.",
    "At least one course must be selected.",
    "Confirmation of dues payment is required.",
    "Invalid student type detected.",
];

/// Helper: build the test app with the in-memory store.
fn test_app() -> axum::Router {
    studentreg_api::app(AppState::new())
}

/// Helper: build the test app around a specific store and config.
fn test_app_with(config: AppConfig, store: Arc<dyn RegistrationStore>) -> axum::Router {
    studentreg_api::app(AppState::with_config(config, store))
}

fn form_post(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn continuing_student_json() -> Value {
    serde_json::json!({
        "fullName": "Tunde Bello",
        "program": "Mathematics",
        "email": "tunde@example.com",
        "phoneNumber": "0809876543",
        "courseSelection": ["MA201", "MA205"],
        "duesPaid": true,
        "studentId": "UNI/2021/0042",
        "yearOfStudy": "3"
    })
}

/// Helper: read response body as string.
async fn body_string(response: axum::http::Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Store whose saves fail and whose reads return rows it cannot decode.
struct FailingStore;

#[async_trait]
impl RegistrationStore for FailingStore {
    async fn save(
        &self,
        _registration: &NormalizedRegistration,
    ) -> Result<RegistrationId, PersistenceError> {
        Err(PersistenceError::Write(
            "duplicate key value violates unique constraint \"students_pkey\"".into(),
        ))
    }

    async fn get(
        &self,
        _id: RegistrationId,
    ) -> Result<Option<StoredRegistration>, PersistenceError> {
        Err(PersistenceError::Read(
            "error occurred while decoding column \"admission_year\"".into(),
        ))
    }

    fn is_durable(&self) -> bool {
        true
    }
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/liveness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/health/readiness")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ready");
}

// -- Successful Submissions ---------------------------------------------------

#[tokio::test]
async fn test_new_student_form_submission() {
    let store = MemoryRegistrationStore::new();
    let app = test_app_with(AppConfig::default(), Arc::new(store.clone()));

    let response = app
        .oneshot(form_post("/register", NEW_STUDENT_FORM))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Registration successful! Your data has been processed."
    );

    let registration = &body["registration"];
    assert_eq!(registration["studentType"], "new");
    assert_eq!(registration["fullName"], "Ada Obi");
    assert_eq!(registration["admissionYear"], 2024);
    assert_eq!(registration["previousSchool"], "Kings College");
    assert_eq!(registration["duesPaid"], true);
    assert_eq!(
        registration["courses"],
        serde_json::json!(["CS101", "MA&lt;101&gt;"])
    );
    assert!(registration.get("studentId").is_none());

    assert_eq!(store.len(), 1);
    let stored = &store.list()[0];
    assert_eq!(body["registrationId"], stored.id.to_string());
}

#[tokio::test]
async fn test_continuing_student_json_submission() {
    let response = test_app()
        .oneshot(json_post("/v1/registrations", continuing_student_json()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let registration = &body["registration"];
    assert_eq!(registration["studentType"], "continuing");
    assert_eq!(registration["studentId"], "UNI/2021/0042");
    assert_eq!(registration["yearOfStudy"], "3");
    assert!(registration.get("admissionYear").is_none());
}

#[tokio::test]
async fn test_durable_store_reports_saved() {
    struct DurableMemory(MemoryRegistrationStore);

    #[async_trait]
    impl RegistrationStore for DurableMemory {
        async fn save(
            &self,
            registration: &NormalizedRegistration,
        ) -> Result<RegistrationId, PersistenceError> {
            self.0.save(registration).await
        }

        async fn get(
            &self,
            id: RegistrationId,
        ) -> Result<Option<StoredRegistration>, PersistenceError> {
            self.0.get(id).await
        }

        fn is_durable(&self) -> bool {
            true
        }
    }

    let app = test_app_with(
        AppConfig::default(),
        Arc::new(DurableMemory(MemoryRegistrationStore::new())),
    );
    let response = app
        .oneshot(json_post("/v1/registrations", continuing_student_json()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Registration successful! Your data has been saved."
    );
}

// -- Validation Failures ------------------------------------------------------

#[tokio::test]
async fn test_empty_post_lists_every_error_in_order() {
    let store = MemoryRegistrationStore::new();
    let app = test_app_with(AppConfig::default(), Arc::new(store.clone()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["message"], EMPTY_SUBMISSION_MESSAGES.join("<br>"));
    assert_eq!(body["errors"], serde_json::json!(EMPTY_SUBMISSION_MESSAGES));
    assert!(store.is_empty(), "rejected submissions must not be stored");
}

#[tokio::test]
async fn test_custom_error_delimiter() {
    let config = AppConfig {
        error_delimiter: "\n".into(),
        ..AppConfig::default()
    };
    let app = test_app_with(config, Arc::new(MemoryRegistrationStore::new()));

    let response = app
        .oneshot(json_post("/v1/registrations", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["message"], EMPTY_SUBMISSION_MESSAGES.join("\n"));
}

#[tokio::test]
async fn test_continuing_student_missing_year_of_study() {
    let mut payload = continuing_student_json();
    payload["yearOfStudy"] = Value::String("   ".into());

    let response = test_app()
        .oneshot(json_post("/v1/registrations", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["errors"], serde_json::json!(["Year of Study is required."]));
}

#[tokio::test]
async fn test_unchecked_dues_rejected() {
    let mut payload = continuing_student_json();
    payload["duesPaid"] = Value::Bool(false);

    let response = test_app()
        .oneshot(json_post("/v1/registrations", payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(
        body["errors"],
        serde_json::json!(["Confirmation of dues payment is required."])
    );
}

// -- Request Handling ---------------------------------------------------------

#[tokio::test]
async fn test_get_on_register_is_invalid_method() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/register")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(response.headers()[header::ALLOW], "POST");
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Invalid request method.");
}

#[tokio::test]
async fn test_put_on_registrations_is_invalid_method() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/v1/registrations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(continuing_student_json().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/v1/registrations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"fullName\": "))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let config = AppConfig {
        max_body_bytes: 64,
        ..AppConfig::default()
    };
    let app = test_app_with(config, Arc::new(MemoryRegistrationStore::new()));

    let response = app
        .oneshot(form_post("/register", NEW_STUDENT_FORM))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert_ne!(response.status(), StatusCode::CREATED);
}

// -- Storage Failures ---------------------------------------------------------

#[tokio::test]
async fn test_storage_failure_hides_database_detail() {
    let app = test_app_with(AppConfig::default(), Arc::new(FailingStore));

    let response = app
        .oneshot(json_post("/v1/registrations", continuing_student_json()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert_eq!(
        body["message"],
        "Database error: the registration could not be saved."
    );
    assert!(!body.to_string().contains("students_pkey"));
}

// -- Read-back ----------------------------------------------------------------

#[tokio::test]
async fn test_get_registration_round_trip() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(form_post("/register", NEW_STUDENT_FORM))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["registrationId"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/registrations/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["registration"]["id"], id.as_str());
    assert_eq!(body["registration"]["studentType"], "new");
    assert_eq!(body["registration"]["email"], "ada@example.com");
    assert!(body["registration"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_get_unknown_registration_is_not_found() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri(format!("/v1/registrations/{}", uuid_nil()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_get_registration_with_malformed_id() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/v1/registrations/not-a-uuid")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_registration_read_failure() {
    let app = test_app_with(AppConfig::default(), Arc::new(FailingStore));
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/registrations/{}", uuid_nil()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "Database error: the registration could not be retrieved."
    );
}

fn uuid_nil() -> &'static str {
    "00000000-0000-0000-0000-000000000000"
}

// -- OpenAPI ------------------------------------------------------------------

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let spec = body_json(response).await;
    assert!(spec["openapi"].as_str().unwrap().starts_with("3."));
    assert!(spec["paths"]["/v1/registrations"].is_object());
}
