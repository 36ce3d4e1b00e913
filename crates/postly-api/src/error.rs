use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use postly_store::{ErrorKind, StoreError};
use postly_types::api::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("invalid user name or password")]
    InvalidCredentials,

    #[error("missing or invalid session token")]
    Unauthorized,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Store(e) => {
                let kind = e.kind();
                let status = match kind {
                    ErrorKind::AlreadyExists => StatusCode::CONFLICT,
                    ErrorKind::NotFound => StatusCode::NOT_FOUND,
                    ErrorKind::Empty | ErrorKind::TooLong | ErrorKind::InvalidRange => {
                        StatusCode::BAD_REQUEST
                    }
                    ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, kind.as_str())
            }
            ApiError::MissingField(_) => (StatusCode::BAD_REQUEST, "missing_field"),
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid_credentials"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            error!("{}", self);
        } else if status == StatusCode::UNAUTHORIZED {
            warn!("{}", self);
        }

        (status, Json(ErrorResponse { error: code.to_string() })).into_response()
    }
}
