use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use taskdeck_core::storage::{repository_error_to_status_code, RepositoryError};
use taskdeck_core::task::ValidationError;

pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        } else if self.0.downcast_ref::<ValidationError>().is_some() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        // Server-side failures carry storage detail (query text, file paths)
        // that must not reach clients. Log it and answer with a fixed body.
        if status_code.is_server_error() {
            tracing::error!(error = ?self.0, status = %status_code, "Request failed");
            return (status_code, "Internal server error").into_response();
        }

        (status_code, self.0.to_string()).into_response()
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
