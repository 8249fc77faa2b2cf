//! Mapping from service errors to HTTP responses.

use api_shared::pb::{ErrorRes, FieldErrorRes};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pms_core::PatientError;

/// The central error type returned by REST handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Patient(#[from] PatientError),

    #[error("invalid request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("missing query parameter: {0}")]
    MissingQuery(&'static str),
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, ErrorRes) {
        let plain = |status, detail: String| {
            (
                status,
                ErrorRes {
                    detail,
                    errors: Vec::new(),
                },
            )
        };

        match self {
            ApiError::Patient(PatientError::Validation(e)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorRes {
                    detail: e.to_string(),
                    errors: e
                        .errors()
                        .iter()
                        .map(|f| FieldErrorRes {
                            field: f.field.to_string(),
                            message: f.message.clone(),
                        })
                        .collect(),
                },
            ),
            ApiError::Patient(PatientError::NotFound(_)) => {
                plain(StatusCode::NOT_FOUND, "Patient not found".into())
            }
            ApiError::Patient(PatientError::AlreadyExists(_)) => {
                plain(StatusCode::BAD_REQUEST, "Patient already exists".into())
            }
            ApiError::Patient(
                e @ (PatientError::InvalidSortField(_) | PatientError::InvalidSortOrder(_)),
            ) => plain(StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Patient(_) => plain(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".into(),
            ),
            ApiError::Body(rejection @ JsonRejection::MissingJsonContentType(_)) => {
                plain(rejection.status(), rejection.body_text())
            }
            ApiError::Body(rejection) => {
                plain(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())
            }
            ApiError::MissingQuery(name) => plain(
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("query parameter '{name}' is required"),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();

        if status.is_server_error() {
            tracing::error!("request failed: {:?}", self);
        } else {
            tracing::warn!("request rejected ({}): {}", status.as_u16(), self);
        }

        (status, Json(body)).into_response()
    }
}
