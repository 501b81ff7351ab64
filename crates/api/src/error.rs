use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use roster_core::error::CoreError;
use roster_core::form::{EditTarget, EmployeeForm};
use serde_json::json;
use validator::ValidationErrors;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `roster_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A filesystem error while writing or deleting a photo.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// A submitted employee form failed validation. The form is echoed back,
    /// together with the edited record's id and photo for edit forms.
    #[error("Invalid form submission: {errors}")]
    InvalidForm {
        form: EmployeeForm,
        errors: ValidationErrors,
        edit: Option<EditTarget>,
    },

    /// The multipart body could not be read. Carries axum's status, so an
    /// upload over the body limit is a 413.
    #[error("Multipart error: {0}")]
    Multipart(#[from] MultipartError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidForm { form, errors, edit } => {
                let mut echoed = json!(form);
                if let (Some(edit), Some(fields)) = (edit, echoed.as_object_mut()) {
                    fields.insert("id".into(), json!(edit.id));
                    fields.insert(
                        "existing_photo_path".into(),
                        json!(edit.existing_photo_path),
                    );
                }
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({
                        "error": "One or more fields are invalid",
                        "code": "VALIDATION_ERROR",
                        "form": echoed,
                        "fields": errors,
                    }),
                )
            }

            // Echo the requested id so the client can say which record is missing.
            AppError::Core(core @ CoreError::NotFound { id, .. }) => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": core.to_string(),
                    "code": "NOT_FOUND",
                    "id": id,
                }),
            ),

            other => {
                let (status, code, message) = classify(other);
                (status, json!({ "error": message, "code": code }))
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Status, error code, and client-safe message for the remaining variants.
fn classify(err: &AppError) -> (StatusCode, &'static str, String) {
    match err {
        AppError::Core(core) => match core {
            CoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND", core.to_string()),
            CoreError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            CoreError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            CoreError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal core error");
                internal()
            }
        },

        AppError::Database(err) => classify_sqlx_error(err),

        AppError::Storage(err) => {
            tracing::error!(error = %err, kind = ?err.kind(), "Photo storage error");
            internal()
        }

        AppError::InvalidForm { errors, .. } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "VALIDATION_ERROR",
            errors.to_string(),
        ),
        AppError::Multipart(err) => {
            let status = err.status();
            let code = match status {
                StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                s if s.is_server_error() => {
                    tracing::error!(error = %err, "Failed to read multipart body");
                    return internal();
                }
                _ => "BAD_REQUEST",
            };
            (status, code, err.body_text())
        }
        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        AppError::InternalError(msg) => {
            tracing::error!(error = %msg, "Internal error");
            internal()
        }
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            internal()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
