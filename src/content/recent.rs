//! Recency ordering and the home page's recent-writings selection

use super::{DisplayPost, Post};

/// Number of writings shown on the home page
pub const RECENT_POSTS_LIMIT: usize = 3;

/// Posts ordered newest first.
///
/// The sort is stable: posts sharing a date keep their collection order.
pub fn by_recency(posts: &[Post]) -> Vec<&Post> {
    let mut ordered: Vec<&Post> = posts.iter().collect();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}

/// The `limit` most recent posts, projected for display
pub fn recent_posts(posts: &[Post], limit: usize) -> Vec<DisplayPost> {
    by_recency(posts)
        .into_iter()
        .take(limit)
        .map(DisplayPost::from)
        .collect()
}

/// The three most recent posts, projected for display
pub fn load_recent_posts(posts: &[Post]) -> Vec<DisplayPost> {
    recent_posts(posts, RECENT_POSTS_LIMIT)
}
