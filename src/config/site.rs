//! Site configuration (_config.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    /// One or two sentences shown in the identity blurb on the home page
    pub bio: String,
    pub avatar: Option<String>,
    pub language: String,
    #[serde(default)]
    pub socials: Vec<SocialLink>,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub content_dir: String,
    pub writings_dir: String,
    pub data_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Home page
    pub recent_posts: usize,
    pub home_projects: usize,

    // Writing
    pub words_per_minute: usize,
    pub render_drafts: bool,
    pub highlight_theme: String,
    pub line_numbers: bool,

    // Date format (moment-style tokens)
    pub date_format: String,

    // Feed
    pub feed_limit: usize,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "folio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            bio: String::new(),
            avatar: None,
            language: "en".to_string(),
            socials: Vec::new(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            content_dir: "content".to_string(),
            writings_dir: "writings".to_string(),
            data_dir: "data".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            recent_posts: crate::content::RECENT_POSTS_LIMIT,
            home_projects: 4,

            words_per_minute: 200,
            render_drafts: false,
            highlight_theme: "base16-ocean.dark".to_string(),
            line_numbers: false,

            date_format: "MMM D, YYYY".to_string(),

            feed_limit: 20,

            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// A profile link shown next to the identity blurb
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub link: String,
}
