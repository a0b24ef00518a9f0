pub mod dynamodb;
pub mod s3;

use std::sync::Arc;

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use tracing::info;

use self::{dynamodb::table::BookTable, s3::object::ImageBucket};
use super::{
    config::Config,
    handler::Handler,
    store::{BlobStore, RecordStore, StoreError},
};

/// Shared SDK configuration for the stores the handler talks to.
pub struct AwsProvider {
    config: SdkConfig,
    settings: Config,
}

impl AwsProvider {
    pub async fn new(settings: Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = settings.region.clone() {
            loader = loader.region(Region::new(region));
        }
        let config = loader.load().await;
        info!(
            "AWS provider ready: table[{}] bucket[{}] region[{}]",
            settings.table_name,
            settings.bucket_name,
            config
                .region()
                .map(|r| r.to_string())
                .unwrap_or_else(|| "unset".to_string())
        );
        Self { config, settings }
    }
    pub fn book_table(&self) -> BookTable {
        BookTable::new(
            aws_sdk_dynamodb::Client::new(&self.config),
            &self.settings.table_name,
        )
    }
    pub fn image_bucket(&self) -> ImageBucket {
        ImageBucket::new(
            aws_sdk_s3::Client::new(&self.config),
            &self.settings.bucket_name,
        )
    }
    /// A handler wired to the DynamoDB table and S3 bucket.
    pub fn handler(&self) -> Handler {
        let records: Arc<dyn RecordStore> = Arc::new(self.book_table());
        let images: Arc<dyn BlobStore> = Arc::new(self.image_bucket());
        Handler::new(records, images)
    }
}

/// Keeps the remote error code and message of a failed SDK call.
pub(crate) fn service_error<E: ProvideErrorMetadata + std::fmt::Display>(err: E) -> StoreError {
    StoreError::service(
        err.code().unwrap_or("Unknown"),
        err.message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string()),
    )
}
