use crate::models::ErrorResponse;
use crate::services::ClientError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::any::Any;
use std::fmt;

pub const MSG_ZIPCODE_NOT_FOUND: &str = "can not find zipcode";
pub const MSG_INVALID_ZIPCODE: &str = "invalid zipcode";
pub const MSG_INTERNAL_ERROR: &str = "internal server error";

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// The `{cep}` path parameter was absent or empty.
    MissingZipcode,
    /// The `{cep}` path parameter was present but malformed.
    InvalidZipcode(String),
    /// The postal lookup provider does not know the code.
    ZipcodeNotFound(String),
    /// One of the upstream clients failed.
    Client(ClientError),
    /// Anything else.
    Internal(String),
}

impl AppError {
    /// Maps the error to the status and message exposed to callers.
    ///
    /// Upstream details never leak into the message.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::MissingZipcode | AppError::ZipcodeNotFound(_) => {
                (StatusCode::NOT_FOUND, MSG_ZIPCODE_NOT_FOUND)
            }
            AppError::InvalidZipcode(_) => (StatusCode::UNPROCESSABLE_ENTITY, MSG_INVALID_ZIPCODE),
            AppError::Client(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL_ERROR)
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::MissingZipcode => write!(f, "CEP parameter can not be blank"),
            AppError::InvalidZipcode(cep) => write!(f, "Invalid zipcode: {}", cep),
            AppError::ZipcodeNotFound(cep) => write!(f, "Zipcode not found: {}", cep),
            AppError::Client(e) => write!(f, "Client error: {}", e),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Client(e) => Some(e),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Logs with the full internal detail, then renders the uniform
    /// `{"message": ...}` body.
    fn into_response(self) -> Response {
        match &self {
            AppError::MissingZipcode => tracing::warn!("CEP parameter not provided in request"),
            AppError::InvalidZipcode(cep) => tracing::warn!("Invalid CEP format: {}", cep),
            AppError::ZipcodeNotFound(cep) => tracing::warn!("CEP not found: {}", cep),
            AppError::Client(e) => {
                tracing::error!(provider = %e.provider(), "Upstream client error: {}", e)
            }
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        }

        let (status, message) = self.status_and_message();
        error_response(status, message)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::Client(err)
    }
}

pub fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.to_string(),
        }),
    )
        .into_response()
}

/// Renders a handler panic as an unclassified internal error.
///
/// Installed through `tower_http::catch_panic::CatchPanicLayer::custom`.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", detail)).into_response()
}
