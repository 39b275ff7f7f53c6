pub mod asset;
pub mod error;
pub mod fetcher;
pub mod req_consumer;
pub mod request;
