//! folio: a small static site generator for a personal portfolio and blog
//!
//! Markdown writings and static project/technology metadata are loaded,
//! shaped by the page composer, and rendered through embedded Tera
//! templates into a directory of static HTML.

pub mod commands;
pub mod compose;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use error::ContentError;

/// A site rooted at a directory
#[derive(Clone)]
pub struct Site {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown content directory
    pub content_dir: PathBuf,
    /// Static metadata directory (projects, technologies)
    pub data_dir: PathBuf,
    /// Assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Site {
    /// Open a site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No _config.yml in {:?}, using defaults", base_dir);
            config::SiteConfig::default()
        };

        Ok(Self {
            content_dir: base_dir.join(&config.content_dir),
            data_dir: base_dir.join(&config.data_dir),
            static_dir: base_dir.join(&config.static_dir),
            public_dir: base_dir.join(&config.public_dir),
            config,
            base_dir,
        })
    }

    /// Directory holding the blog posts
    pub fn writings_dir(&self) -> PathBuf {
        self.content_dir.join(&self.config.writings_dir)
    }

    /// Build the static site
    pub fn build(&self) -> Result<()> {
        commands::build::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str, slug: Option<&str>) -> Result<PathBuf> {
        commands::new::create_post(self, title, slug)
    }
}
