//! Content collection - loads writings and pages from the content directory

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::frontmatter::parse_date_string;
use super::{read_time, FrontMatter, MarkdownRenderer, Page, Post};
use crate::error::ContentError;
use crate::helpers::strip_html;
use crate::Site;

lazy_static! {
    static ref SLUG_RE: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

/// Generated routes that standalone pages may not claim
const RESERVED_SLUGS: &[&str] = &["index", "writings", "projects", "css"];

/// Loads the content collection from disk
pub struct Collection<'a> {
    site: &'a Site,
    renderer: MarkdownRenderer,
    include_drafts: bool,
}

impl<'a> Collection<'a> {
    /// Create a new collection loader
    pub fn new(site: &'a Site) -> Self {
        let renderer =
            MarkdownRenderer::new(&site.config.highlight_theme, site.config.line_numbers);
        Self {
            site,
            renderer,
            include_drafts: site.config.render_drafts,
        }
    }

    /// Override whether drafts are loaded
    pub fn with_drafts(mut self, include_drafts: bool) -> Self {
        self.include_drafts = include_drafts;
        self
    }

    /// Load every writing, in file-name order.
    ///
    /// Fails on the first post with a missing or unparsable date, and on
    /// two posts sharing a slug.
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let writings_dir = self.site.writings_dir();
        if !writings_dir.exists() {
            tracing::debug!("No writings directory at {:?}", writings_dir);
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(&writings_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let post = self.load_post(path)?;

            if post.draft && !self.include_drafts {
                tracing::debug!("Skipping draft {:?}", path);
                continue;
            }

            if let Some(first) = seen.get(&post.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: post.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                }
                .into());
            }
            seen.insert(post.slug.clone(), path.to_path_buf());

            posts.push(post);
        }

        Ok(posts)
    }

    /// Load a single writing from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&source).with_context(|| format!("{:?}", path))?;

        let date = match fm.date.as_deref() {
            None => {
                return Err(ContentError::MissingDate {
                    path: path.to_path_buf(),
                }
                .into())
            }
            Some(value) => parse_date_string(value).ok_or_else(|| ContentError::InvalidDate {
                path: path.to_path_buf(),
                value: value.to_string(),
            })?,
        };

        let stem = file_stem(path);
        let slug = fm.slug.unwrap_or_else(|| slug::slugify(&stem));
        if !SLUG_RE.is_match(&slug) {
            return Err(ContentError::InvalidSlug {
                path: path.to_path_buf(),
                slug,
            }
            .into());
        }

        let (summary, full) = MarkdownRenderer::split_summary(body);
        let content = self.renderer.render(&full)?;
        let read_time = fm
            .read_time
            .unwrap_or_else(|| read_time::estimate(&content, self.site.config.words_per_minute));
        let description = match (fm.description, summary) {
            (Some(description), _) => Some(description),
            (None, Some(summary)) => {
                let html = self.renderer.render(summary)?;
                Some(strip_html(&html).trim().to_string())
            }
            (None, None) => None,
        };

        let mut post = Post::new(fm.title.as_deref().unwrap_or(&stem), date, &slug, &read_time);
        post.description = description;
        post.tags = fm.tags;
        post.draft = fm.draft;
        post.raw = body.to_string();
        post.content = content;
        post.source = path.to_path_buf();

        Ok(post)
    }

    /// Load the standalone pages at the top of the content directory
    pub fn load_pages(&self) -> Result<Vec<Page>> {
        let content_dir = &self.site.content_dir;
        if !content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();
        let mut seen: HashMap<String, PathBuf> = HashMap::new();

        for entry in WalkDir::new(content_dir)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || !is_markdown_file(path) {
                continue;
            }

            let page = self.load_page(path)?;
            if RESERVED_SLUGS.contains(&page.slug.as_str()) {
                return Err(ContentError::ReservedSlug {
                    path: path.to_path_buf(),
                    slug: page.slug,
                }
                .into());
            }

            if let Some(first) = seen.get(&page.slug) {
                return Err(ContentError::DuplicateSlug {
                    slug: page.slug,
                    first: first.clone(),
                    second: path.to_path_buf(),
                }
                .into());
            }
            seen.insert(page.slug.clone(), path.to_path_buf());

            pages.push(page);
        }

        Ok(pages)
    }

    /// Load a single page from a file
    fn load_page(&self, path: &Path) -> Result<Page> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {:?}", path))?;
        let (fm, body) = FrontMatter::parse(&source).with_context(|| format!("{:?}", path))?;

        let stem = file_stem(path);
        let slug = fm.slug.unwrap_or_else(|| slug::slugify(&stem));
        if !SLUG_RE.is_match(&slug) {
            return Err(ContentError::InvalidSlug {
                path: path.to_path_buf(),
                slug,
            }
            .into());
        }

        Ok(Page {
            title: fm.title.unwrap_or_else(|| stem.clone()),
            slug,
            description: fm.description,
            layout: fm.layout.unwrap_or_else(|| "page".to_string()),
            content: self.renderer.render(body)?,
            source: path.to_path_buf(),
        })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let temp = TempDir::new().unwrap();
        for (name, body) in files {
            let path = temp.path().join("content").join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, body).unwrap();
        }
        let site = Site::new(temp.path()).unwrap();
        (temp, site)
    }

    #[test]
    fn test_load_posts() {
        let (_temp, site) = site_with(&[
            (
                "writings/hello-world.md",
                "---\ntitle: Hello World\ndate: 2024-01-15\ntags: rust\n---\n\nFirst words.\n<!-- more -->\nThe rest.\n",
            ),
            (
                "writings/second.md",
                "---\ntitle: Second\ndate: 2024-02-01\nslug: number-two\nreadTime: 9 min read\n---\nBody\n",
            ),
        ]);

        let posts = Collection::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 2);

        let hello = &posts[0];
        assert_eq!(hello.slug, "hello-world");
        assert_eq!(hello.date.to_string(), "2024-01-15");
        assert_eq!(hello.read_time, "1 min read");
        assert_eq!(hello.description.as_deref(), Some("First words."));
        assert_eq!(hello.tags, vec!["rust"]);
        assert!(hello.content.contains("The rest."));

        let second = &posts[1];
        assert_eq!(second.slug, "number-two");
        assert_eq!(second.read_time, "9 min read");
    }

    #[test]
    fn test_missing_writings_dir_is_empty() {
        let (_temp, site) = site_with(&[]);
        assert!(Collection::new(&site).load_posts().unwrap().is_empty());
    }

    #[test]
    fn test_missing_date_fails() {
        let (_temp, site) = site_with(&[("writings/undated.md", "---\ntitle: Undated\n---\nBody\n")]);

        let err = Collection::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::MissingDate { .. })
        ));
    }

    #[test]
    fn test_invalid_date_fails() {
        let (_temp, site) = site_with(&[(
            "writings/bad.md",
            "---\ntitle: Bad\ndate: last tuesday\n---\nBody\n",
        )]);

        let err = Collection::new(&site).load_posts().unwrap_err();
        match err.downcast_ref::<ContentError>() {
            Some(ContentError::InvalidDate { value, .. }) => assert_eq!(value, "last tuesday"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let (_temp, site) = site_with(&[
            ("writings/a.md", "---\ndate: 2024-01-01\nslug: same\n---\n"),
            ("writings/b.md", "---\ndate: 2024-01-02\nslug: same\n---\n"),
        ]);

        let err = Collection::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::DuplicateSlug { slug, .. }) if slug == "same"
        ));
    }

    #[test]
    fn test_invalid_slug_fails() {
        let (_temp, site) = site_with(&[(
            "writings/a.md",
            "---\ndate: 2024-01-01\nslug: Not A Slug\n---\n",
        )]);

        let err = Collection::new(&site).load_posts().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::InvalidSlug { .. })
        ));
    }

    #[test]
    fn test_drafts() {
        let (_temp, site) = site_with(&[
            ("writings/draft.md", "---\ndate: 2024-01-01\ndraft: true\n---\n"),
            ("writings/done.md", "---\ndate: 2024-01-02\n---\n"),
        ]);

        let posts = Collection::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "done");

        let posts = Collection::new(&site).with_drafts(true).load_posts().unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[test]
    fn test_load_pages() {
        let (_temp, site) = site_with(&[
            ("uses.md", "---\ntitle: Uses\nlayout: about\n---\nMy desk.\n"),
            ("writings/post.md", "---\ndate: 2024-01-01\n---\n"),
        ]);

        let pages = Collection::new(&site).load_pages().unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "uses");
        assert_eq!(pages[0].layout, "about");
        assert!(pages[0].content.contains("My desk."));
    }

    #[test]
    fn test_page_slug_must_be_url_safe() {
        for slug in ["../../escaped", "atom.xml", "writings.json"] {
            let body = format!("---\ntitle: Evil\nslug: {}\n---\n", slug);
            let (_temp, site) = site_with(&[("evil.md", body.as_str())]);

            let err = Collection::new(&site).load_pages().unwrap_err();
            match err.downcast_ref::<ContentError>() {
                Some(ContentError::InvalidSlug { slug: found, .. }) => assert_eq!(found, slug),
                other => panic!("unexpected error for {}: {:?}", slug, other),
            }
        }
    }

    #[test]
    fn test_page_cannot_claim_generated_route() {
        for name in ["projects.md", "writings.md", "index.md"] {
            let (_temp, site) = site_with(&[(name, "---\ntitle: Clash\n---\n")]);

            let err = Collection::new(&site).load_pages().unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ContentError>(),
                    Some(ContentError::ReservedSlug { .. })
                ),
                "{} was accepted",
                name
            );
        }
    }

    #[test]
    fn test_duplicate_page_slug_fails() {
        let (_temp, site) = site_with(&[
            ("about.md", "---\ntitle: About\n---\n"),
            ("me.md", "---\ntitle: Me\nslug: about\n---\n"),
        ]);

        let err = Collection::new(&site).load_pages().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ContentError>(),
            Some(ContentError::DuplicateSlug { slug, .. }) if slug == "about"
        ));
    }
}
