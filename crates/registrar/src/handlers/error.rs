use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use registrar_core::school::{MessageResponse, ValidationError};
use registrar_core::storage::{repository_error_to_status_code, DateRangeError, RepositoryError};

/// Application error type that wraps `anyhow::Error`.
///
/// Domain errors keep their meaning across the `anyhow` boundary: the status
/// code is picked by downcasting, and the body is `{"message": "..."}`.
pub struct AppError(pub anyhow::Error);

impl AppError {
    /// HTTP status for the wrapped error.
    pub fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.is::<ValidationError>() || self.0.is::<DateRangeError>() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(status = %status_code, error = %self.0, "Application error");
        } else {
            tracing::warn!(status = %status_code, error = %self.0, "Request rejected");
        }

        let body = MessageResponse {
            message: self.0.to_string(),
        };
        (status_code, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
