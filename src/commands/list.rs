//! List site content

use anyhow::Result;

use crate::content::{load_recent_posts, Collection};
use crate::data::SiteData;
use crate::helpers::post_url;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let collection = Collection::new(site);

    match content_type {
        "post" | "posts" => {
            let posts = collection.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}] ({})",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.read_time
                );
            }
        }
        "recent" => {
            let posts = collection.load_posts()?;
            let recent = load_recent_posts(&posts);
            println!("Recent ({}):", recent.len());
            for post in recent {
                println!(
                    "  {} - {} -> {}",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post_url(&site.config, &post.slug)
                );
            }
        }
        "page" | "pages" => {
            let pages = collection.load_pages()?;
            println!("Pages ({}):", pages.len());
            for page in pages {
                println!("  {} [/{}/] ({})", page.title, page.slug, page.layout);
            }
        }
        "project" | "projects" => {
            let data = SiteData::load(site)?;
            println!("Projects ({}):", data.projects.len());
            for project in data.projects {
                let marker = if project.featured { " *" } else { "" };
                println!("  {}{} - {}", project.title, marker, project.link);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, recent, pages, projects",
                content_type
            );
        }
    }

    Ok(())
}
