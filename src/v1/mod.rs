pub mod aws;
pub mod book;
pub mod config;
pub mod handler;
pub mod storage;
pub mod store;
