//! Post and Page models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A blog post in the content collection
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Publication date
    pub date: NaiveDate,

    /// Unique, URL-safe identifier
    pub slug: String,

    /// Display string such as "4 min read"
    pub read_time: String,

    /// Short summary, from front-matter or the text before `<!-- more -->`
    pub description: Option<String>,

    /// Post tags
    pub tags: Vec<String>,

    /// Drafts are skipped unless drafts are rendered
    pub draft: bool,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: PathBuf,
}

impl Post {
    /// Create a post with the minimal required fields
    pub fn new(title: &str, date: NaiveDate, slug: &str, read_time: &str) -> Self {
        Self {
            title: title.to_string(),
            date,
            slug: slug.to_string(),
            read_time: read_time.to_string(),
            description: None,
            tags: Vec::new(),
            draft: false,
            raw: String::new(),
            content: String::new(),
            source: PathBuf::new(),
        }
    }

    /// The list-rendering projection of this post
    pub fn display(&self) -> DisplayPost {
        DisplayPost::from(self)
    }
}

/// The minimal projection of a [`Post`] used for list rendering.
///
/// An owned copy: nothing done to it reaches the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayPost {
    pub title: String,
    pub slug: String,
    pub date: NaiveDate,
    pub read_time: String,
}

impl From<&Post> for DisplayPost {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            slug: post.slug.clone(),
            date: post.date,
            read_time: post.read_time.clone(),
        }
    }
}

/// A standalone page such as `about.md` or `uses.md`
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Page title
    pub title: String,

    /// Output directory name, from the file stem
    pub slug: String,

    pub description: Option<String>,

    /// Template to use: "about" adds the technology grid, anything else is "page"
    pub layout: String,

    /// Rendered HTML content
    pub content: String,

    /// Source file path
    pub source: PathBuf,
}
