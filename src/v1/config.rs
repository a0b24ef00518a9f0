use std::env;

use tracing::debug;

pub const DEFAULT_TABLE: &str = "bookstore";
pub const DEFAULT_BUCKET: &str = "bookstore-task-images";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub table_name: String,
    pub bucket_name: String,
    pub region: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE.to_string(),
            bucket_name: DEFAULT_BUCKET.to_string(),
            region: None,
        }
    }
}

impl Config {
    /// Reads settings from the environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            table_name: non_empty("BOOKSTORE_TABLE").unwrap_or(defaults.table_name),
            bucket_name: non_empty("BOOKSTORE_BUCKET").unwrap_or(defaults.bucket_name),
            region: non_empty("AWS_REGION"),
        }
    }
}
