//! HTTP handlers for the server.

pub mod mappings;
pub mod text;

use axum::http::StatusCode;

use crate::error::AsciifyError;

/// Map a library error to a status code and message.
pub(super) fn error_response(error: AsciifyError) -> (StatusCode, String) {
    let status = match &error {
        AsciifyError::MappingNotFound(_) => StatusCode::NOT_FOUND,
        AsciifyError::Encoding { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, error.to_string())
}
