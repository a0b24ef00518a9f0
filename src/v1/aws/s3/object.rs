use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client};
use tracing::debug;

use crate::v1::{
    aws::service_error,
    store::{BlobStore, StoreError},
};

const IMAGE_CONTENT_TYPE: &str = "image/jpeg";

/// Cover images kept as objects in one S3 bucket.
#[derive(Clone, Debug)]
pub struct ImageBucket {
    client: Client,
    bucket: String,
}

impl ImageBucket {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl BlobStore for ImageBucket {
    async fn put(&self, key: &str, body: Vec<u8>) -> Result<(), StoreError> {
        debug!("PutObject[{}] into bucket[{}]", key, self.bucket);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(IMAGE_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| service_error(e.into_service_error()))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        debug!("GetObject[{}] from bucket[{}]", key, self.bucket);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let err = e.into_service_error();
                if err.is_no_such_key() {
                    debug!("Object[{}] cannot be found", key);
                    return Ok(None);
                }
                return Err(service_error(err));
            }
        };
        output
            .body
            .collect()
            .await
            .map(|data| Some(data.into_bytes().to_vec()))
            .map_err(|e| StoreError::service("ByteStreamError", e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        debug!("DeleteObject[{}] from bucket[{}]", key, self.bucket);
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| service_error(e.into_service_error()))
    }
}
