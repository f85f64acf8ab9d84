//! Content module - writings, pages, and the recent-writings selection

pub mod collection;
mod frontmatter;
mod markdown;
mod post;
pub mod read_time;
mod recent;

pub use collection::Collection;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{DisplayPost, Page, Post};
pub use recent::{by_recency, load_recent_posts, recent_posts, RECENT_POSTS_LIMIT};
