use crate::news::error::NewsError;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::fs;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    pub section: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_editor_pick: bool,
    #[serde(default)]
    pub trending_rank: Option<u32>,
    #[serde(default)]
    pub author_name: Option<String>,
}

pub async fn read_posts(file_path: &str) -> Result<Vec<Post>, NewsError> {
    let posts_string = fs::read_to_string(file_path).await?;
    let posts: Vec<Post> = serde_json::from_str(posts_string.as_str())?;
    Ok(posts)
}
