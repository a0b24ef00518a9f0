use tracing::info;

use super::{
    error::{store_failure, RequestError},
    image::{load_image, IMAGE_UPLOAD},
    response::{BookResponse, OK},
};
use crate::v1::{
    aws::dynamodb::expression::UpdateExpression,
    book::{Book, ImagePayload, IMAGE},
    store::{BlobStore, RecordStore},
};

/// Overwrites every attribute sent except the ISBN, then uploads the image if there is one.
///
/// The record write and the upload are not atomic: if the upload fails the record keeps its
/// new attributes, including the `Image` reference, and the caller gets a 500.
pub async fn update_book(
    records: &dyn RecordStore,
    images: &dyn BlobStore,
    book: Book,
    image: Option<ImagePayload>,
) -> BookResponse {
    let image = match load_image(image.as_ref()).await {
        Ok(image) => image,
        Err(response) => return response,
    };
    let image_key = book.image_key();
    let mut update = UpdateExpression::for_book(&book);
    if image.is_some() {
        update = update.set(IMAGE, image_key.clone());
    }
    if update.is_empty() {
        return RequestError::NothingToUpdate.into();
    }
    if let Err(e) = records.update(&book.key(), &update).await {
        return store_failure(&e, "update");
    }
    info!("Book[{}] updated: {:?}", book.isbn, update.field_names());
    if let Some(bytes) = image {
        if let Err(e) = images.put(&image_key, bytes).await {
            return store_failure(&e, IMAGE_UPLOAD);
        }
    }
    BookResponse::success(OK, "Book updated successfully!")
}
