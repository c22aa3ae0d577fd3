//! Crate-level error type and its HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::codec::CodecError;
use crate::model::UrlId;
use crate::storage::StoreError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The short code contains something that is not base-62
    #[error("malformed short code: {0}")]
    MalformedCode(#[from] CodecError),

    /// `id + OFFSET` does not fit in 64 bits
    #[error("id {0} is out of the encodable range")]
    IdOutOfRange(UrlId),

    /// A stored target cannot be sent as a `Location` header
    #[error("stored target is not a valid redirect location")]
    InvalidRedirectTarget,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // A redirect for a bad code must look exactly like a missing one
            Error::MalformedCode(_) => (StatusCode::NOT_FOUND, "not_found"),
            Error::IdOutOfRange(_) => (StatusCode::BAD_REQUEST, "id_out_of_range"),
            Error::InvalidRedirectTarget => {
                tracing::error!("stored target is not a valid header value");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
            Error::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let message = match status {
            StatusCode::NOT_FOUND => "URL not found".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (
            status,
            Json(json!({
                "error": message,
                "code": code
            })),
        )
            .into_response()
    }
}
