//! Generator module - writes the static site using the built-in templates

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::fs;

use tera::Context;
use walkdir::WalkDir;

use crate::compose::Composer;
use crate::content::{by_recency, DisplayPost, Page, Post};
use crate::data::SiteData;
use crate::helpers::{date_xml, escape_xml, full_url_for, url_for};
use crate::templates::{MenuItem, SiteContext, TemplateRenderer, STYLESHEET};
use crate::Site;

/// Static site generator using Tera templates
pub struct Generator {
    site: Site,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(site: &Site) -> Result<Self> {
        Ok(Self {
            site: site.clone(),
            renderer: TemplateRenderer::new()?,
        })
    }

    /// Generate the entire site
    pub fn generate(&self, posts: &[Post], pages: &[Page], data: &SiteData) -> Result<()> {
        fs::create_dir_all(&self.site.public_dir)?;

        // Built-in stylesheet first so a site's own css/style.css wins
        self.write_file("css/style.css", STYLESHEET)?;
        self.copy_static_assets()?;

        let composer = Composer::new(&self.site.config, data);
        let site_context = self.build_site_context(pages);

        self.generate_home(&composer, posts, &site_context)?;
        self.generate_writings(&composer, posts, &site_context)?;
        self.generate_post_pages(&composer, posts, &site_context)?;
        self.generate_projects(&composer, &site_context)?;
        self.generate_pages(&composer, pages, &site_context)?;

        self.generate_atom_feed(posts)?;
        self.generate_writings_index(posts)?;

        Ok(())
    }

    /// Site-wide template values, including the navigation menu
    fn build_site_context(&self, pages: &[Page]) -> SiteContext {
        let config = &self.site.config;

        let mut menu = vec![
            MenuItem {
                name: "Writings".to_string(),
                path: url_for(config, "writings/"),
            },
            MenuItem {
                name: "Projects".to_string(),
                path: url_for(config, "projects/"),
            },
        ];
        menu.extend(pages.iter().map(|p| MenuItem {
            name: p.title.clone(),
            path: url_for(config, &format!("{}/", p.slug)),
        }));

        SiteContext {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
            url: config.url.clone(),
            root: url_for(config, ""),
            date_format: config.date_format.clone(),
            stylesheet: url_for(config, "css/style.css"),
            feed: url_for(config, "atom.xml"),
            menu,
        }
    }

    /// Create a context from a page view plus the common variables
    fn create_context<T: Serialize>(
        &self,
        view: &T,
        site_context: &SiteContext,
        current_path: &str,
    ) -> Result<Context> {
        let mut context = Context::from_serialize(view)?;
        context.insert("site", site_context);
        context.insert("current_path", current_path);
        context.insert("current_year", &chrono::Local::now().format("%Y").to_string());
        Ok(context)
    }

    /// Generate the home page
    fn generate_home(
        &self,
        composer: &Composer,
        posts: &[Post],
        site_context: &SiteContext,
    ) -> Result<()> {
        let view = composer.home(posts);
        let context = self.create_context(&view, site_context, &site_context.root)?;
        let html = self.renderer.render("home.html", &context)?;
        self.write_file("index.html", &html)?;
        tracing::debug!("Generated home page with {} recent posts", view.posts.len());
        Ok(())
    }

    /// Generate the writings index
    fn generate_writings(
        &self,
        composer: &Composer,
        posts: &[Post],
        site_context: &SiteContext,
    ) -> Result<()> {
        let view = composer.writings(posts);
        let path = url_for(&self.site.config, "writings/");
        let context = self.create_context(&view, site_context, &path)?;
        let html = self.renderer.render("writings.html", &context)?;
        self.write_file("writings/index.html", &html)
    }

    /// Generate individual post pages
    fn generate_post_pages(
        &self,
        composer: &Composer,
        posts: &[Post],
        site_context: &SiteContext,
    ) -> Result<()> {
        let ordered = by_recency(posts);
        let writings_path = url_for(&self.site.config, "writings/");

        for (index, post) in ordered.iter().enumerate() {
            let view = composer
                .post(&ordered, index)
                .ok_or_else(|| anyhow!("No post at index {}", index))?;
            let context = self.create_context(&view, site_context, &writings_path)?;
            let html = self.renderer.render("post.html", &context)?;

            self.write_file(&format!("writings/{}/index.html", post.slug), &html)?;
            tracing::debug!("Generated post: {}", post.slug);
        }

        tracing::info!("Generated {} posts", ordered.len());
        Ok(())
    }

    /// Generate the projects listing
    fn generate_projects(&self, composer: &Composer, site_context: &SiteContext) -> Result<()> {
        let view = composer.projects();
        let path = url_for(&self.site.config, "projects/");
        let context = self.create_context(&view, site_context, &path)?;
        let html = self.renderer.render("projects.html", &context)?;
        self.write_file("projects/index.html", &html)
    }

    /// Generate standalone pages
    fn generate_pages(
        &self,
        composer: &Composer,
        pages: &[Page],
        site_context: &SiteContext,
    ) -> Result<()> {
        for page in pages {
            let template_name = match page.layout.as_str() {
                "about" => "about.html",
                _ => "page.html",
            };

            let view = composer.page(page);
            let path = url_for(&self.site.config, &format!("{}/", page.slug));
            let context = self.create_context(&view, site_context, &path)?;
            let html = self.renderer.render(template_name, &context)?;

            self.write_file(&format!("{}/index.html", page.slug), &html)?;
            tracing::debug!("Generated page: {}", page.slug);
        }

        Ok(())
    }

    /// Generate Atom feed
    fn generate_atom_feed(&self, posts: &[Post]) -> Result<()> {
        let config = &self.site.config;
        let ordered = by_recency(posts);
        let base_url = config.url.trim_end_matches('/');

        let updated = ordered
            .first()
            .map(|p| date_xml(p.date))
            .unwrap_or_else(|| chrono::Utc::now().to_rfc3339());

        let mut feed = String::new();
        feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
        feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
        feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&config.title)));
        feed.push_str(&format!(
            "  <link href=\"{}\" rel=\"self\"/>\n",
            full_url_for(config, "atom.xml")
        ));
        feed.push_str(&format!("  <link href=\"{}\"/>\n", full_url_for(config, "")));
        feed.push_str(&format!("  <updated>{}</updated>\n", updated));
        feed.push_str(&format!("  <id>{}</id>\n", full_url_for(config, "")));
        feed.push_str(&format!(
            "  <author><name>{}</name></author>\n",
            escape_xml(&config.author)
        ));

        for post in ordered.iter().take(config.feed_limit) {
            let link = full_url_for(config, &format!("writings/{}/", post.slug));
            feed.push_str("  <entry>\n");
            feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&post.title)));
            feed.push_str(&format!("    <link href=\"{}\"/>\n", link));
            feed.push_str(&format!("    <id>{}</id>\n", link));
            feed.push_str(&format!("    <published>{}</published>\n", date_xml(post.date)));
            feed.push_str(&format!("    <updated>{}</updated>\n", date_xml(post.date)));
            if let Some(description) = &post.description {
                feed.push_str(&format!(
                    "    <summary>{}</summary>\n",
                    escape_xml(description)
                ));
            }
            let content = convert_relative_urls_to_absolute(&post.content, base_url);
            feed.push_str(&format!(
                "    <content type=\"html\"><![CDATA[{}]]></content>\n",
                strip_invalid_xml_chars(&content).replace("]]>", "]]]]><![CDATA[>")
            ));
            feed.push_str("  </entry>\n");
        }

        feed.push_str("</feed>\n");

        self.write_file("atom.xml", &feed)?;
        tracing::debug!("Generated atom.xml");
        Ok(())
    }

    /// Generate `writings.json`, the writings list for client-side scripts
    fn generate_writings_index(&self, posts: &[Post]) -> Result<()> {
        let index: Vec<DisplayPost> = by_recency(posts).into_iter().map(Post::display).collect();
        let json = serde_json::to_string_pretty(&index)?;
        self.write_file("writings.json", &json)
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.site.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.site.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)
                .map_err(|e| anyhow!("Failed to copy {:?} to {:?}: {}", path, dest, e))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }

    /// Write a file under the public directory, creating parents
    fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.site.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        Ok(())
    }
}

/// Convert root-relative URLs in HTML content to absolute URLs
fn convert_relative_urls_to_absolute(content: &str, base_url: &str) -> String {
    content
        .replace("href=\"/", &format!("href=\"{}/", base_url))
        .replace("src=\"/", &format!("src=\"{}/", base_url))
        .replace("href='/", &format!("href='{}/", base_url))
        .replace("src='/", &format!("src='{}/", base_url))
}

/// Strip characters XML 1.0 does not allow (keeps tab, newline, carriage return)
fn strip_invalid_xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            c == '\t'
                || c == '\n'
                || c == '\r'
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect()
}
