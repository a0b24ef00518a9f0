use std::{env, fs, sync::Arc};

use anyhow::{anyhow, Context};
use bookstore::prelude::*;
use serde_json::{json, Value};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        print_usage(&args[0]);
        return Err(anyhow!("No arguments has been provided"));
    }
    lambda_runtime::tracing::init_default_subscriber();
    let rt = tokio::runtime::Runtime::new()?;
    let response = match args[1].as_str() {
        "invoke" => {
            let event = read_event(&args[2])?;
            rt.block_on(async {
                let aws = AwsProvider::new(Config::from_env()).await;
                aws.handler().handle_event(event).await
            })
        }
        "echo" => {
            let handler = Handler::new(
                Arc::new(MemoryRecordStore::new()),
                Arc::new(MemoryBlobStore::new()),
            );
            rt.block_on(handler.dispatch(ApiRequest::new("echo", json!({ "message": args[2] }))))
        }
        other => {
            print_usage(&args[0]);
            return Err(anyhow!("Invalid command: {}", other));
        }
    };
    println!("{}", response);
    Ok(())
}

fn read_event(path: &str) -> anyhow::Result<Value> {
    let raw = fs::read_to_string(path).with_context(|| format!("Could not read event {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("Event {} is not valid JSON", path))
}

fn print_usage(cmd: &str) {
    println!("Usage: {} <command> <argument>", cmd);
    println!("Commands:");
    println!("  invoke <event.json>  Run one gateway event against the configured stores");
    println!("  echo <message>       Run the echo operation locally");
}
