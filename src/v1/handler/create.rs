use serde_json::Value;
use tracing::{info, warn};

use super::{
    error::store_failure,
    image::{load_image, IMAGE_UPLOAD},
    response::{BookResponse, CONFLICT, CREATED},
};
use crate::v1::{
    book::{Book, ImagePayload, IMAGE},
    store::{BlobStore, RecordStore, StoreError},
};

/// Inserts a new book, refusing to overwrite an existing ISBN.
///
/// With an image, the record stores `Image: "<ISBN>.jpg"` and the image is uploaded to that
/// key once the insert has succeeded. A failed upload removes the record again, so the caller
/// can retry the same create.
pub async fn create_book(
    records: &dyn RecordStore,
    images: &dyn BlobStore,
    mut book: Book,
    image: Option<ImagePayload>,
) -> BookResponse {
    let image = match load_image(image.as_ref()).await {
        Ok(image) => image,
        Err(response) => return response,
    };
    let image_key = book.image_key();
    if image.is_some() {
        book.attributes
            .insert(IMAGE.to_string(), Value::String(image_key.clone()));
    }
    match records.put_new(&book).await {
        Ok(()) => info!("Book[{}] created", book.isbn),
        Err(StoreError::ConditionFailed(_)) => {
            info!("Book[{}] already exists", book.isbn);
            return BookResponse::message(CONFLICT, "Book with this ISBN already exists");
        }
        Err(e) => return store_failure(&e, "create"),
    }
    if let Some(bytes) = image {
        if let Err(e) = images.put(&image_key, bytes).await {
            if let Err(rollback) = records.delete(&book.key()).await {
                warn!(
                    "Could not remove Book[{}] after failed image upload: {}",
                    book.isbn, rollback
                );
            }
            return store_failure(&e, IMAGE_UPLOAD);
        }
    }
    BookResponse::success(CREATED, "Book created successfully!")
}
