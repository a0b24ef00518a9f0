use thiserror::Error;
use tracing::error;

use super::response::{BookResponse, BAD_REQUEST, INTERNAL_SERVER_ERROR};
use crate::v1::store::StoreError;

/// Malformed requests. These never reach a store and always answer 400.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Missing operation or data in request")]
    MissingData,
    #[error("Invalid JSON format for book data")]
    InvalidJson,
    #[error("Missing ISBN in request")]
    MissingIsbn,
    #[error("ISBN must be a string, found {0}")]
    InvalidIsbn(String),
    #[error("{0}")]
    InvalidImage(String),
    #[error("No attributes to update")]
    NothingToUpdate,
}

impl From<RequestError> for BookResponse {
    fn from(err: RequestError) -> Self {
        BookResponse::message(BAD_REQUEST, err.to_string())
    }
}

/// Maps a store failure for `operation` onto a 500 carrying the store's message.
pub fn store_failure(err: &StoreError, operation: &str) -> BookResponse {
    error!(
        code = err.code(),
        "Error during {} operation: {}",
        operation.to_lowercase(),
        err
    );
    BookResponse::message(
        INTERNAL_SERVER_ERROR,
        format!("Error during {} operation: {}", operation, err),
    )
}
