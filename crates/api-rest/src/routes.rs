//! REST handlers.
//!
//! Handlers are thin: extract, call `PatientService`, wrap the result.

use crate::{error::ApiError, AppState};
use api_shared::pb::{
    CreatePatientReq, ErrorRes, HealthRes, MessageRes, PatientMap, PatientRecord,
    UpdatePatientReq,
};
use api_shared::HealthService;
use axum::{
    extract::{FromRequest, Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// JSON body extractor whose rejections use the API error format.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortParams {
    /// Sort on the basis of height, weight or bmi
    pub sort_by: Option<String>,
    /// Sort in ascending or descending order (default asc)
    pub order: Option<String>,
}

#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service banner", body = MessageRes))
)]
pub async fn hello() -> Json<MessageRes> {
    Json(MessageRes::new("Patient Management System API"))
}

#[utoipa::path(
    get,
    path = "/about",
    responses((status = 200, description = "Service description", body = MessageRes))
)]
pub async fn about() -> Json<MessageRes> {
    Json(MessageRes::new(
        "Handling all your records in one place with the power of API",
    ))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint used by monitoring and load balancers.
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/view",
    responses(
        (status = 200, description = "Every patient keyed by id", body = HashMap<String, PatientRecord>),
        (status = 500, description = "Patient store unreadable", body = ErrorRes)
    )
)]
/// Dump the entire store.
#[axum::debug_handler]
pub async fn view(State(state): State<AppState>) -> Result<Json<PatientMap>, ApiError> {
    Ok(Json(state.patient_service.list()?))
}

#[utoipa::path(
    get,
    path = "/patient/{id}",
    params(("id" = String, Path, description = "ID of the patient in DB", example = "P001")),
    responses(
        (status = 200, description = "The patient", body = PatientRecord),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
/// Fetch one patient by id.
///
/// # Errors
/// Returns `404 Not Found` if no patient has this id.
#[axum::debug_handler]
pub async fn view_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PatientRecord>, ApiError> {
    Ok(Json(state.patient_service.get(&id)?))
}

#[utoipa::path(
    get,
    path = "/sort",
    params(SortParams),
    responses(
        (status = 200, description = "All patients, ordered", body = [PatientRecord]),
        (status = 400, description = "Invalid sort_by or order", body = ErrorRes),
        (status = 422, description = "sort_by missing", body = ErrorRes)
    )
)]
/// List all patients ordered by height, weight or bmi.
///
/// # Errors
/// Returns `400 Bad Request` if `sort_by` is not one of height/weight/bmi or `order` is not
/// asc/desc, and `422 Unprocessable Entity` if `sort_by` is absent.
#[axum::debug_handler]
pub async fn sort_patients(
    State(state): State<AppState>,
    Query(params): Query<SortParams>,
) -> Result<Json<Vec<PatientRecord>>, ApiError> {
    let sort_by = params.sort_by.ok_or(ApiError::MissingQuery("sort_by"))?;
    let sorted = state
        .patient_service
        .sort(&sort_by, params.order.as_deref())?;
    Ok(Json(sorted))
}

#[utoipa::path(
    post,
    path = "/create",
    request_body = CreatePatientReq,
    responses(
        (status = 201, description = "Patient created", body = MessageRes),
        (status = 400, description = "Patient already exists", body = ErrorRes),
        (status = 422, description = "Invalid patient", body = ErrorRes)
    )
)]
/// Create a new patient.
///
/// `bmi` and `verdict` are computed server-side; values supplied in the body are ignored.
///
/// # Errors
/// Returns `422 Unprocessable Entity` listing every invalid field, or `400 Bad Request` if the
/// id is already taken.
#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePatientReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    state.patient_service.create(req)?;
    Ok((
        StatusCode::CREATED,
        Json(MessageRes::new("patient created successfully")),
    ))
}

#[utoipa::path(
    put,
    path = "/edit/{id}",
    params(("id" = String, Path, description = "ID of the patient in DB", example = "P001")),
    request_body = UpdatePatientReq,
    responses(
        (status = 202, description = "Patient updated", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes),
        (status = 422, description = "Merged patient is invalid", body = ErrorRes)
    )
)]
/// Merge the supplied fields into an existing patient.
///
/// # Errors
/// Returns `404 Not Found` for an unknown id and `422 Unprocessable Entity` if the merged
/// record fails validation.
#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<UpdatePatientReq>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    state.patient_service.update(&id, patch)?;
    Ok((StatusCode::ACCEPTED, Json(MessageRes::new("patient updated"))))
}

#[utoipa::path(
    delete,
    path = "/delete/{id}",
    params(("id" = String, Path, description = "ID of the patient in DB", example = "P001")),
    responses(
        (status = 202, description = "Patient deleted", body = MessageRes),
        (status = 404, description = "Patient not found", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<MessageRes>), ApiError> {
    state.patient_service.delete(&id)?;
    Ok((StatusCode::ACCEPTED, Json(MessageRes::new("patient deleted"))))
}
