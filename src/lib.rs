pub mod config;
pub mod market;
pub mod news;
pub mod panel;
