use tracing::{info, warn};

use super::{
    error::store_failure,
    response::{BookResponse, OK},
};
use crate::v1::{
    book::BookKey,
    store::{BlobStore, RecordStore, StoreError},
};

/// What happened to the cover image once the record itself was gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageCleanup {
    /// The record had no `Image` reference.
    NotRequested,
    Removed(String),
    Failed { key: String, message: String },
    /// The record could not be fetched before deletion, so any image was left alone.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub key: BookKey,
    pub image_cleanup: ImageCleanup,
}

/// Deletes the record, then best-effort deletes the image it referenced.
///
/// Only the record delete can fail the operation. The pre-fetch and the image delete report
/// through [`DeleteOutcome::image_cleanup`].
pub async fn delete_book(
    records: &dyn RecordStore,
    images: &dyn BlobStore,
    key: BookKey,
) -> Result<DeleteOutcome, StoreError> {
    let existing = records.get(&key).await;
    records.delete(&key).await?;
    let image_cleanup = match existing {
        Err(e) => {
            warn!("Could not fetch Book[{}] before delete: {}", key.isbn, e);
            ImageCleanup::Unknown(e.to_string())
        }
        Ok(book) => match book.as_ref().and_then(|b| b.image_reference()) {
            None => ImageCleanup::NotRequested,
            Some(image) => match images.delete(image).await {
                Ok(()) => ImageCleanup::Removed(image.to_string()),
                Err(e) => {
                    warn!("Could not delete image[{}] of Book[{}]: {}", image, key.isbn, e);
                    ImageCleanup::Failed {
                        key: image.to_string(),
                        message: e.to_string(),
                    }
                }
            },
        },
    };
    Ok(DeleteOutcome { key, image_cleanup })
}

pub async fn delete_book_response(
    records: &dyn RecordStore,
    images: &dyn BlobStore,
    key: BookKey,
) -> BookResponse {
    match delete_book(records, images, key).await {
        Ok(outcome) => {
            info!(
                "Book[{}] deleted, image cleanup: {:?}",
                outcome.key.isbn, outcome.image_cleanup
            );
            BookResponse::success(OK, "Book deleted successfully!")
        }
        Err(e) => store_failure(&e, "delete"),
    }
}
