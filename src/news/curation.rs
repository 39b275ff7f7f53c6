use crate::news::error::NewsError;
use crate::news::post::Post;
use std::cmp::Reverse;

const FRONT_PAGE_LIMIT: usize = 20;
const FEATURED_LIMIT: usize = 5;
const DEFAULT_POSTS_PER_PAGE: usize = 5;
const SECTION_TRENDING_LIMIT: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct FrontPage {
    pub featured: Vec<Post>,
    pub latest: Vec<Post>,
    pub editors_picks: Vec<Post>,
    pub trending: Vec<Post>,
}

impl FrontPage {
    pub fn from_posts(posts: &[Post]) -> Self {
        let mut latest = posts.to_vec();
        latest.sort_by_key(|post| Reverse(post.created_at));
        latest.truncate(FRONT_PAGE_LIMIT);

        let featured = latest
            .iter()
            .filter(|post| post.is_featured)
            .take(FEATURED_LIMIT)
            .cloned()
            .collect();
        let editors_picks = latest
            .iter()
            .filter(|post| post.is_editor_pick)
            .cloned()
            .collect();

        Self {
            featured,
            editors_picks,
            trending: trending(&latest),
            latest,
        }
    }
}

// equal ranks go newest first
pub fn trending(posts: &[Post]) -> Vec<Post> {
    let mut ranked: Vec<Post> = posts
        .iter()
        .filter(|post| post.trending_rank.is_some())
        .cloned()
        .collect();
    ranked.sort_by_key(|post| (post.trending_rank, Reverse(post.created_at)));
    ranked
}

// Sidebar list for a section page: its own top ranked posts, or the global
// top ranked posts when nothing in the section is ranked.
pub fn section_trending(posts: &[Post], section: &str) -> Vec<Post> {
    let in_section: Vec<Post> = posts
        .iter()
        .filter(|post| post.section == section)
        .cloned()
        .collect();

    let mut ranked = trending(&in_section);
    if ranked.is_empty() {
        ranked = trending(posts);
    }
    ranked.truncate(SECTION_TRENDING_LIMIT);
    ranked
}

// tags come from URL slugs (`market-release`), so dashes are read as spaces
pub fn filter_by_section(posts: &[Post], section: &str, tag: Option<&str>) -> Vec<Post> {
    let needle = tag.map(|tag| tag.replace('-', " ").to_lowercase());

    let mut matching: Vec<Post> = posts
        .iter()
        .filter(|post| post.section == section)
        .filter(|post| match &needle {
            Some(needle) => post.category.to_lowercase().contains(needle.as_str()),
            None => true,
        })
        .cloned()
        .collect();
    matching.sort_by_key(|post| Reverse(post.created_at));
    matching
}

pub fn find_post<'a>(posts: &'a [Post], id: &str) -> Result<&'a Post, NewsError> {
    posts
        .iter()
        .find(|post| post.id == id)
        .ok_or_else(|| NewsError::NotFound(id.to_string()))
}

#[derive(Debug, Clone)]
pub struct LoadMore {
    per_page: usize,
    visible: usize,
}

impl Default for LoadMore {
    fn default() -> Self {
        Self::new(DEFAULT_POSTS_PER_PAGE)
    }
}

impl LoadMore {
    pub fn new(per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            per_page,
            visible: per_page,
        }
    }

    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    pub fn load_more(&mut self) {
        self.visible += self.per_page;
    }
}

pub fn render_trending(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "Trending Now\n  No trending posts yet.".to_string();
    }

    let mut lines = vec!["Trending Now".to_string()];
    lines.extend(posts.iter().enumerate().map(|(i, post)| {
        format!("  {:02} [{}] {}", i + 1, post.category.to_uppercase(), post.title)
    }));
    lines.join("\n")
}

pub fn render_editors_picks(posts: &[Post]) -> Option<String> {
    if posts.is_empty() {
        return None;
    }

    let mut lines = vec!["Editor's Picks".to_string()];
    lines.extend(posts.iter().map(|post| {
        format!(
            "  {} ({}) /post/{}",
            post.title,
            post.created_at.format("%Y-%m-%d"),
            post.id
        )
    }));
    Some(lines.join("\n"))
}
