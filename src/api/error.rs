use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Error moving file: {0}")]
    StorageWriteFailed(String),

    #[error("Unable to scan directory: {0}")]
    StorageReadFailed(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::StorageWriteFailed(_)
            | AppError::StorageReadFailed(_)
            | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }

        // Plain-text body, matching the HTML-first surface of the server
        (status, self.to_string()).into_response()
    }
}
