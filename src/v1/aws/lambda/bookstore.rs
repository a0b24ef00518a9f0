use bookstore::prelude::*;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::tracing::init_default_subscriber();
    let aws = AwsProvider::new(Config::from_env()).await;
    let handler = aws.handler();
    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move { Ok::<ApiResponse, Error>(handler.handle_event(event.payload).await) }
    }))
    .await
}
