//! In-process stores for tests and local runs. Every call is recorded so callers can
//! assert exactly which remote operations a request would have issued.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::v1::{
    aws::dynamodb::expression::UpdateExpression,
    book::{Book, BookKey},
    store::{BlobStore, RecordStore, StoreError},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordCall {
    PutNew(Book),
    Get(BookKey),
    Update(BookKey, UpdateExpression),
    Delete(BookKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordOp {
    PutNew,
    Get,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobCall {
    Put(String, Vec<u8>),
    Get(String),
    Delete(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlobOp {
    Put,
    Get,
    Delete,
}

/// A scripted service failure: `(code, message)`.
type Failure = (String, String);

#[derive(Debug, Default, Clone)]
pub struct MemoryRecordStore {
    books: Arc<Mutex<HashMap<String, Book>>>,
    calls: Arc<Mutex<Vec<RecordCall>>>,
    failures: Arc<Mutex<HashMap<RecordOp, Failure>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_books(books: impl IntoIterator<Item = Book>) -> Self {
        let store = Self::new();
        store
            .books
            .lock()
            .unwrap()
            .extend(books.into_iter().map(|b| (b.isbn.clone(), b)));
        store
    }
    /// Makes every subsequent `op` call fail with a service error.
    pub fn fail_on(&self, op: RecordOp, code: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (code.to_string(), message.to_string()));
    }
    pub fn calls(&self) -> Vec<RecordCall> {
        self.calls.lock().unwrap().clone()
    }
    pub fn book(&self, isbn: &str) -> Option<Book> {
        self.books.lock().unwrap().get(isbn).cloned()
    }
    pub fn len(&self) -> usize {
        self.books.lock().unwrap().len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn record(&self, op: RecordOp, call: RecordCall) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&op) {
            Some((code, message)) => Err(StoreError::service(code, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_new(&self, book: &Book) -> Result<(), StoreError> {
        self.record(RecordOp::PutNew, RecordCall::PutNew(book.clone()))?;
        let mut books = self.books.lock().unwrap();
        if books.contains_key(&book.isbn) {
            return Err(StoreError::ConditionFailed(
                "The conditional request failed".to_string(),
            ));
        }
        books.insert(book.isbn.clone(), book.clone());
        Ok(())
    }

    async fn get(&self, key: &BookKey) -> Result<Option<Book>, StoreError> {
        self.record(RecordOp::Get, RecordCall::Get(key.clone()))?;
        Ok(self.books.lock().unwrap().get(&key.isbn).cloned())
    }

    async fn update(&self, key: &BookKey, update: &UpdateExpression) -> Result<(), StoreError> {
        self.record(
            RecordOp::Update,
            RecordCall::Update(key.clone(), update.clone()),
        )?;
        let mut books = self.books.lock().unwrap();
        let book = books
            .entry(key.isbn.clone())
            .or_insert_with(|| Book::new(key.isbn.clone()));
        for (name, value) in update.assignments() {
            book.attributes.insert(name.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete(&self, key: &BookKey) -> Result<(), StoreError> {
        self.record(RecordOp::Delete, RecordCall::Delete(key.clone()))?;
        self.books.lock().unwrap().remove(&key.isbn);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    calls: Arc<Mutex<Vec<BlobCall>>>,
    failures: Arc<Mutex<HashMap<BlobOp, Failure>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn fail_on(&self, op: BlobOp, code: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (code.to_string(), message.to_string()));
    }
    pub fn calls(&self) -> Vec<BlobCall> {
        self.calls.lock().unwrap().clone()
    }
    pub fn object(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(key).cloned()
    }
    fn record(&self, op: BlobOp, call: BlobCall) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(&op) {
            Some((code, message)) => Err(StoreError::service(code, message)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        self.record(BlobOp::Put, BlobCall::Put(key.to_string(), body.clone()))?;
        self.objects.lock().unwrap().insert(key.to_string(), body);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.record(BlobOp::Get, BlobCall::Get(key.to_string()))?;
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.record(BlobOp::Delete, BlobCall::Delete(key.to_string()))?;
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}
