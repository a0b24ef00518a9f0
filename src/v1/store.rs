use std::io;

use async_trait::async_trait;
use thiserror::Error;

use super::{
    aws::dynamodb::expression::UpdateExpression,
    book::{Book, BookKey},
};

/// Point operations on the book table, keyed by ISBN.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts `book`, failing with [`StoreError::ConditionFailed`] if the ISBN already exists.
    async fn put_new(&self, book: &Book) -> Result<(), StoreError>;
    async fn get(&self, key: &BookKey) -> Result<Option<Book>, StoreError>;
    async fn update(&self, key: &BookKey, update: &UpdateExpression) -> Result<(), StoreError>;
    async fn delete(&self, key: &BookKey) -> Result<(), StoreError>;
}

/// Named binary objects in a single container.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError>;
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    /// Deleting a key that does not exist succeeds.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0}")]
    ConditionFailed(String),
    #[error("{message}")]
    Service { code: String, message: String },
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Serialization(String),
}

impl StoreError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Service {
            code: code.into(),
            message: message.into(),
        }
    }
    pub fn code(&self) -> &str {
        match self {
            StoreError::ConditionFailed(_) => "ConditionalCheckFailedException",
            StoreError::Service { code, .. } => code,
            StoreError::Io(_) => "IoError",
            StoreError::Serialization(_) => "SerializationError",
        }
    }
}
