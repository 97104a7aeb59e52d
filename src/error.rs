use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_contact::{ErrorBody, RelayError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Not found")]
    NotFound,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Relay(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let error = match &self {
            AppError::Relay(err) => err.public_message(),
            AppError::NotFound => self.to_string(),
        };

        (status_code, Json(ErrorBody { error })).into_response()
    }
}
