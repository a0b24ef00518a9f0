use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::handler::error::RequestError;

pub const ISBN: &str = "ISBN";
pub const IMAGE: &str = "Image";

/// A book record: the `ISBN` key plus whatever other attributes the caller sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    #[serde(rename = "ISBN")]
    pub isbn: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    #[serde(rename = "ISBN")]
    pub isbn: String,
}

/// The `Image` value split off an inbound payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ImagePayload {
    /// Base64 data sent inline with a request flagged `isBase64Encoded`.
    Encoded(String),
    /// A path to a local file whose contents are uploaded.
    File(PathBuf),
}

impl ImagePayload {
    pub fn new(value: String, base64_encoded: bool) -> Self {
        if base64_encoded {
            ImagePayload::Encoded(value)
        } else {
            ImagePayload::File(PathBuf::from(value))
        }
    }
}

impl Book {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self {
            isbn: isbn.into(),
            attributes: Map::new(),
        }
    }
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
    /// Validates a payload mapping, pulling `ISBN` out as the key.
    pub fn from_payload(mut payload: Map<String, Value>) -> Result<Self, RequestError> {
        let isbn = take_isbn(&mut payload)?;
        Ok(Self {
            isbn,
            attributes: payload,
        })
    }
    pub fn key(&self) -> BookKey {
        BookKey {
            isbn: self.isbn.clone(),
        }
    }
    /// Key under which this book's cover lives in the blob store.
    pub fn image_key(&self) -> String {
        self.key().image_key()
    }
    /// The stored `Image` reference, if the record carries one.
    pub fn image_reference(&self) -> Option<&str> {
        self.attributes.get(IMAGE).and_then(Value::as_str)
    }
    pub fn to_value(&self) -> Value {
        let mut map = self.attributes.clone();
        map.insert(ISBN.to_string(), Value::String(self.isbn.clone()));
        Value::Object(map)
    }
}

impl BookKey {
    pub fn new(isbn: impl Into<String>) -> Self {
        Self { isbn: isbn.into() }
    }
    /// Only `ISBN` is read from the payload; other fields are ignored.
    pub fn from_payload(mut payload: Map<String, Value>) -> Result<Self, RequestError> {
        take_isbn(&mut payload).map(|isbn| Self { isbn })
    }
    pub fn image_key(&self) -> String {
        format!("{}.jpg", self.isbn)
    }
}

fn take_isbn(payload: &mut Map<String, Value>) -> Result<String, RequestError> {
    match payload.remove(ISBN) {
        Some(Value::String(isbn)) if !isbn.is_empty() => Ok(isbn),
        Some(Value::String(_)) | None => Err(RequestError::MissingIsbn),
        Some(other) => Err(RequestError::InvalidIsbn(other.to_string())),
    }
}

/// Splits the optional `Image` field off a payload.
pub fn take_image(
    payload: &mut Map<String, Value>,
    base64_encoded: bool,
) -> Result<Option<ImagePayload>, RequestError> {
    match payload.remove(IMAGE) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(ImagePayload::new(s, base64_encoded))),
        Some(other) => Err(RequestError::InvalidImage(format!(
            "Image must be a string, found {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn payload_splits_key_from_attributes() {
        let book =
            Book::from_payload(map(json!({"ISBN": "123", "title": "Dune", "price": 9.5}))).unwrap();
        assert_eq!(book.isbn, "123");
        assert_eq!(book.attributes.len(), 2);
        assert!(!book.attributes.contains_key(ISBN));
        assert_eq!(book.to_value()["ISBN"], "123");
    }

    #[test]
    fn missing_or_empty_isbn_is_rejected() {
        assert!(matches!(
            Book::from_payload(map(json!({"title": "Dune"}))),
            Err(RequestError::MissingIsbn)
        ));
        assert!(matches!(
            BookKey::from_payload(map(json!({"ISBN": ""}))),
            Err(RequestError::MissingIsbn)
        ));
        assert!(matches!(
            BookKey::from_payload(map(json!({"ISBN": 42}))),
            Err(RequestError::InvalidIsbn(_))
        ));
    }

    #[test]
    fn image_is_split_according_to_encoding_flag() {
        let mut payload = map(json!({"ISBN": "1", "Image": "cover.jpg"}));
        assert_eq!(
            take_image(&mut payload, false).unwrap(),
            Some(ImagePayload::File(PathBuf::from("cover.jpg")))
        );
        assert!(!payload.contains_key(IMAGE));

        let mut payload = map(json!({"Image": "aGk="}));
        assert_eq!(
            take_image(&mut payload, true).unwrap(),
            Some(ImagePayload::Encoded("aGk=".into()))
        );

        let mut payload = map(json!({"Image": 7}));
        assert!(take_image(&mut payload, false).is_err());
    }

    #[test]
    fn image_key_derives_from_isbn() {
        assert_eq!(BookKey::new("978").image_key(), "978.jpg");
    }

    #[test]
    fn serde_flattens_attributes() {
        let book: Book = serde_json::from_value(json!({"ISBN": "9", "author": "Le Guin"})).unwrap();
        assert_eq!(book, Book::new("9").with_attribute("author", "Le Guin"));
        assert_eq!(serde_json::to_value(&book).unwrap(), book.to_value());
    }
}
