pub mod curation;
pub mod error;
pub mod post;
