use serde_json::json;

use super::{
    error::store_failure,
    response::{BookResponse, OK},
};
use crate::v1::{book::BookKey, store::RecordStore};

/// Looks a book up by ISBN. A missing book is an empty object, not an error.
pub async fn read_book(records: &dyn RecordStore, key: &BookKey) -> BookResponse {
    match records.get(key).await {
        Ok(Some(book)) => BookResponse::new(OK, book.to_value()),
        Ok(None) => BookResponse::new(OK, json!({})),
        Err(e) => store_failure(&e, "get"),
    }
}
