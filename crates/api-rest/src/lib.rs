//! # API REST
//!
//! REST API implementation for the patient management service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, status codes, CORS, request tracing)
//!
//! All data operations are delegated to `pms_core::PatientService`.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod routes;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use pms_core::PatientService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::ApiError;

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pub patient_service: PatientService,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::hello,
        routes::about,
        routes::health,
        routes::view,
        routes::view_patient,
        routes::sort_patients,
        routes::create_patient,
        routes::update_patient,
        routes::delete_patient,
    ),
    components(schemas(
        api_shared::pb::Gender,
        api_shared::pb::Verdict,
        api_shared::pb::PatientRecord,
        api_shared::pb::CreatePatientReq,
        api_shared::pb::UpdatePatientReq,
        api_shared::pb::MessageRes,
        api_shared::pb::HealthRes,
        api_shared::pb::ErrorRes,
        api_shared::pb::FieldErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the full router with Swagger UI, CORS and request tracing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::hello))
        .route("/about", get(routes::about))
        .route("/health", get(routes::health))
        .route("/view", get(routes::view))
        .route("/patient/:id", get(routes::view_patient))
        .route("/sort", get(routes::sort_patients))
        .route("/create", post(routes::create_patient))
        .route("/edit/:id", put(routes::update_patient))
        .route("/delete/:id", delete(routes::delete_patient))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
