pub mod create;
pub mod delete;
pub mod error;
pub mod image;
pub mod read;
pub mod request;
pub mod response;
pub mod update;

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, info, warn};

use self::{
    error::RequestError,
    request::{ApiRequest, Operation},
    response::{ApiResponse, BookResponse, OK},
};
use super::{
    book::{take_image, Book, BookKey, ImagePayload},
    store::{BlobStore, RecordStore},
};

/// Routes one gateway request to the matching book operation.
#[derive(Clone)]
pub struct Handler {
    records: Arc<dyn RecordStore>,
    images: Arc<dyn BlobStore>,
}

impl Handler {
    pub fn new(records: Arc<dyn RecordStore>, images: Arc<dyn BlobStore>) -> Self {
        Self { records, images }
    }

    /// Entry point for a raw gateway event.
    pub async fn handle_event(&self, event: Value) -> ApiResponse {
        debug!("Entire event: {}", event);
        match serde_json::from_value::<ApiRequest>(event) {
            Ok(request) => self.dispatch(request).await,
            Err(e) => {
                warn!("Malformed request event: {}", e);
                BookResponse::from(RequestError::MissingData).into_api_response()
            }
        }
    }

    pub async fn dispatch(&self, request: ApiRequest) -> ApiResponse {
        self.route(request)
            .await
            .unwrap_or_else(BookResponse::from)
            .into_api_response()
    }

    async fn route(&self, request: ApiRequest) -> Result<BookResponse, RequestError> {
        let operation = request.operation()?;
        info!("operation is: {}", operation);
        let records = self.records.as_ref();
        let images = self.images.as_ref();
        Ok(match operation {
            Operation::Echo => echo(&request)?,
            Operation::Create => {
                let (book, image) = book_with_image(&request)?;
                create::create_book(records, images, book, image).await
            }
            Operation::Read => {
                let key = BookKey::from_payload(request.payload()?)?;
                read::read_book(records, &key).await
            }
            Operation::Update => {
                let (book, image) = book_with_image(&request)?;
                update::update_book(records, images, book, image).await
            }
            Operation::Delete => {
                let key = BookKey::from_payload(request.payload()?)?;
                delete::delete_book_response(records, images, key).await
            }
        })
    }
}

/// Parses the payload into a book, with any `Image` split off.
fn book_with_image(request: &ApiRequest) -> Result<(Book, Option<ImagePayload>), RequestError> {
    let mut payload = request.payload()?;
    debug!("book_data after parsing: {:?}", payload);
    let image = take_image(&mut payload, request.is_image_encoded())?;
    Ok((Book::from_payload(payload)?, image))
}

/// Returns `dictionary.message` without touching any store.
fn echo(request: &ApiRequest) -> Result<BookResponse, RequestError> {
    let message = request.echo_message()?;
    Ok(BookResponse::new(OK, json!({ "message": message })))
}
