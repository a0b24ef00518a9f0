use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::{error::ProvideErrorMetadata, types::AttributeValue, Client};
use tracing::debug;

use super::{
    attribute::{from_item, to_attribute, to_item},
    expression::UpdateExpression,
};
use crate::v1::{
    aws::service_error,
    book::{Book, BookKey, ISBN},
    store::{RecordStore, StoreError},
};

/// The book table in DynamoDB.
#[derive(Clone, Debug)]
pub struct BookTable {
    client: Client,
    table_name: String,
}

impl BookTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
    fn key(key: &BookKey) -> HashMap<String, AttributeValue> {
        HashMap::from([(ISBN.to_string(), AttributeValue::S(key.isbn.clone()))])
    }
}

#[async_trait]
impl RecordStore for BookTable {
    async fn put_new(&self, book: &Book) -> Result<(), StoreError> {
        debug!("PutItem[{}] into table[{}]", book.isbn, self.table_name);
        let item = book
            .to_value()
            .as_object()
            .map(to_item)
            .unwrap_or_default();
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(#k)")
            .expression_attribute_names("#k", ISBN)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                let err = e.into_service_error();
                if err.is_conditional_check_failed_exception() {
                    StoreError::ConditionFailed(
                        err.message()
                            .unwrap_or("The conditional request failed")
                            .to_string(),
                    )
                } else {
                    service_error(err)
                }
            })
    }

    async fn get(&self, key: &BookKey) -> Result<Option<Book>, StoreError> {
        debug!("GetItem[{}] from table[{}]", key.isbn, self.table_name);
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(key)))
            .send()
            .await
            .map_err(|e| service_error(e.into_service_error()))?;
        match output.item {
            Some(item) => {
                let record = from_item(&item)?;
                Book::from_payload(record)
                    .map(Some)
                    .map_err(|e| StoreError::Serialization(e.to_string()))
            }
            None => Ok(None),
        }
    }

    async fn update(&self, key: &BookKey, update: &UpdateExpression) -> Result<(), StoreError> {
        debug!(
            "UpdateItem[{}] in table[{}] setting {:?}",
            key.isbn,
            self.table_name,
            update.field_names()
        );
        let values: HashMap<String, AttributeValue> = update
            .values()
            .iter()
            .map(|(k, v)| (k.clone(), to_attribute(v)))
            .collect();
        self.client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(key)))
            .update_expression(update.expression())
            .set_expression_attribute_names(Some(update.names()))
            .set_expression_attribute_values(Some(values))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| service_error(e.into_service_error()))
    }

    async fn delete(&self, key: &BookKey) -> Result<(), StoreError> {
        debug!("DeleteItem[{}] from table[{}]", key.isbn, self.table_name);
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(key)))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| service_error(e.into_service_error()))
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::{
        error::ErrorMetadata,
        operation::{
            delete_item::DeleteItemError,
            get_item::{GetItemError, GetItemOutput},
            put_item::PutItemError,
        },
        types::error::ConditionalCheckFailedException,
    };
    use aws_smithy_mocks::{mock, mock_client};
    use serde_json::json;

    use super::*;

    fn metadata(code: &str, message: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).message(message).build()
    }

    #[tokio::test]
    async fn put_new_conflict_is_condition_failed() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item)
            .match_requests(|req| {
                req.table_name() == Some("books")
                    && req.condition_expression() == Some("attribute_not_exists(#k)")
            })
            .then_error(|| {
                PutItemError::ConditionalCheckFailedException(
                    ConditionalCheckFailedException::builder()
                        .message("The conditional request failed")
                        .meta(metadata(
                            "ConditionalCheckFailedException",
                            "The conditional request failed",
                        ))
                        .build(),
                )
            });
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        let err = table.put_new(&Book::new("123")).await.unwrap_err();
        assert!(matches!(err, StoreError::ConditionFailed(_)), "{:?}", err);
        assert_eq!(err.code(), "ConditionalCheckFailedException");
        assert_eq!(rule.num_calls(), 1);
    }

    #[tokio::test]
    async fn put_new_other_failure_keeps_remote_message() {
        let rule = mock!(aws_sdk_dynamodb::Client::put_item).then_error(|| {
            PutItemError::generic(metadata(
                "ProvisionedThroughputExceededException",
                "Rate exceeded",
            ))
        });
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        match table.put_new(&Book::new("123")).await {
            Err(StoreError::Service { code, message }) => {
                assert_eq!(code, "ProvisionedThroughputExceededException");
                assert_eq!(message, "Rate exceeded");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[tokio::test]
    async fn get_without_item_is_none() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item)
            .match_requests(|req| {
                req.key().and_then(|k| k.get(ISBN)) == Some(&AttributeValue::S("404".into()))
            })
            .then_output(|| GetItemOutput::builder().build());
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        assert!(table.get(&BookKey::new("404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_converts_item_to_book() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item).then_output(|| {
            GetItemOutput::builder()
                .item(ISBN, AttributeValue::S("123".into()))
                .item("title", AttributeValue::S("Dune".into()))
                .item("pages", AttributeValue::N("412".into()))
                .build()
        });
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        let book = table.get(&BookKey::new("123")).await.unwrap().unwrap();
        assert_eq!(
            book.to_value(),
            json!({"ISBN": "123", "title": "Dune", "pages": 412})
        );
    }

    #[tokio::test]
    async fn get_failure_is_service_error() {
        let rule = mock!(aws_sdk_dynamodb::Client::get_item).then_error(|| {
            GetItemError::generic(metadata("ResourceNotFoundException", "table gone"))
        });
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        let err = table.get(&BookKey::new("1")).await.unwrap_err();
        assert_eq!(err.code(), "ResourceNotFoundException");
        assert_eq!(err.to_string(), "table gone");
    }

    #[tokio::test]
    async fn delete_failure_is_service_error() {
        let rule = mock!(aws_sdk_dynamodb::Client::delete_item)
            .then_error(|| DeleteItemError::generic(metadata("AccessDeniedException", "denied")));
        let table = BookTable::new(mock_client!(aws_sdk_dynamodb, [&rule]), "books");
        let err = table.delete(&BookKey::new("1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Service { .. }));
        assert_eq!(err.to_string(), "denied");
    }
}
