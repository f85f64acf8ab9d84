//! Integration tests for building a site end to end

use folio::content::DisplayPost;
use folio::{ContentError, Site};
use std::fs;
use tempfile::TempDir;

mod common;
use common::{sample_site, write_post};

fn read(site: &Site, relative: &str) -> String {
    fs::read_to_string(site.public_dir.join(relative))
        .unwrap_or_else(|e| panic!("missing {}: {}", relative, e))
}

#[test]
fn test_build_writes_every_route() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    for relative in [
        "index.html",
        "writings/index.html",
        "writings/late-summer/index.html",
        "writings/new-year/index.html",
        "writings/may-day/index.html",
        "writings/old-news/index.html",
        "projects/index.html",
        "uses/index.html",
        "atom.xml",
        "writings.json",
        "css/style.css",
    ] {
        assert!(
            site.public_dir.join(relative).exists(),
            "expected {} to be generated",
            relative
        );
    }
}

#[test]
fn test_home_links_three_most_recent_writings() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();
    let home = read(&site, "index.html");

    let positions: Vec<usize> = ["late-summer", "new-year", "may-day"]
        .iter()
        .map(|slug| {
            home.find(&format!("href=\"/writings/{}/\"", slug))
                .unwrap_or_else(|| panic!("home page does not link {}", slug))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(!home.contains("/writings/old-news/"));
    assert_eq!(home.matches("class=\"writing\"").count(), 3);
}

#[test]
fn test_home_regions() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();
    let home = read(&site, "index.html");

    // Identity
    assert!(home.contains("Jane Roe"));
    assert!(home.contains("Writes code."));

    // Technology grid, unknown icons fall back
    assert!(home.contains("devicon-rust-original"));
    assert!(home.contains("devicon-devicon-plain"));

    // Two of three projects, featured first, with a "view more" link
    assert_eq!(home.matches("class=\"project-card\"").count(), 2);
    let beta = home.find("Beta").unwrap();
    let alpha = home.find("Alpha").unwrap();
    assert!(beta < alpha);
    assert!(!home.contains("Gamma"));
    assert!(home.contains("href=\"/projects/\""));
    assert!(home.contains("View more projects"));

    let projects = read(&site, "projects/index.html");
    assert_eq!(projects.matches("class=\"project-card\"").count(), 3);
}

#[test]
fn test_writings_index_and_json() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    let index = read(&site, "writings/index.html");
    assert!(index.contains("/writings/old-news/"));
    assert_eq!(index.matches("class=\"writing\"").count(), 4);

    let posts: Vec<DisplayPost> = serde_json::from_str(&read(&site, "writings.json")).unwrap();
    let slugs: Vec<&str> = posts.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["late-summer", "new-year", "may-day", "old-news"]);
    assert_eq!(posts[0].read_time, "1 min read");
    assert_eq!(posts[0].date.to_string(), "2024-09-06");
}

#[test]
fn test_post_page_and_feed() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    let post = read(&site, "writings/new-year/index.html");
    assert!(post.contains("<h1>Post new-year</h1>"));
    assert!(post.contains("Jan 1, 2024"));
    assert!(post.contains("href=\"/writings/late-summer/\""));
    assert!(post.contains("href=\"/writings/may-day/\""));

    let feed = read(&site, "atom.xml");
    assert!(feed.starts_with("<?xml"));
    assert!(feed.contains("<link href=\"https://example.com/writings/late-summer/\"/>"));
    assert!(feed.contains("<updated>2024-09-06T00:00:00Z</updated>"));
    assert_eq!(feed.matches("<entry>").count(), 4);
}

#[test]
fn test_about_page_shows_technologies() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    let uses = read(&site, "uses/index.html");
    assert!(uses.contains("My desk."));
    assert!(uses.contains("tech-grid"));
}

#[test]
fn test_empty_site_builds() {
    let temp = TempDir::new().unwrap();

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    let home = read(&site, "index.html");
    assert!(home.contains("Nothing written yet."));
    assert_eq!(read(&site, "writings.json").trim(), "[]");
}

#[test]
fn test_invalid_date_fails_build() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "fine", "2024-01-01");
    write_post(temp.path(), "broken", "next tuesday");

    let site = Site::new(temp.path()).unwrap();
    let err = site.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::InvalidDate { .. })
    ));
    assert!(!site.public_dir.join("index.html").exists());
}

#[test]
fn test_duplicate_slug_fails_build() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "same", "2024-01-01");
    fs::write(
        temp.path().join("content/writings/other-file.md"),
        "---\ntitle: Other\ndate: 2024-02-02\nslug: same\n---\n\nBody.\n",
    )
    .unwrap();

    let site = Site::new(temp.path()).unwrap();
    let err = site.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::DuplicateSlug { slug, .. }) if slug == "same"
    ));
}

#[test]
fn test_drafts_only_with_flag() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "published", "2024-01-01");
    fs::write(
        temp.path().join("content/writings/wip.md"),
        "---\ntitle: Work in progress\ndate: 2024-03-03\ndraft: true\n---\n\nNot yet.\n",
    )
    .unwrap();

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();
    assert!(!site.public_dir.join("writings/wip/index.html").exists());

    folio::commands::build::run_with_drafts(&site, true).unwrap();
    assert!(site.public_dir.join("writings/wip/index.html").exists());
}

#[test]
fn test_static_assets_override_stylesheet() {
    let temp = TempDir::new().unwrap();
    let css_dir = temp.path().join("static/css");
    fs::create_dir_all(&css_dir).unwrap();
    fs::write(css_dir.join("style.css"), "body { color: red; }").unwrap();
    fs::write(temp.path().join("static/robots.txt"), "User-agent: *").unwrap();

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    assert_eq!(read(&site, "css/style.css"), "body { color: red; }");
    assert_eq!(read(&site, "robots.txt"), "User-agent: *");
}

#[test]
fn test_clean_removes_output() {
    let temp = TempDir::new().unwrap();
    sample_site(temp.path());

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();
    assert!(site.public_dir.exists());

    site.clean().unwrap();
    assert!(!site.public_dir.exists());
}

#[test]
fn test_page_slug_cannot_leave_output_dir() {
    let temp = TempDir::new().unwrap();
    write_post(temp.path(), "fine", "2024-01-01");
    fs::write(
        temp.path().join("content/evil.md"),
        "---\ntitle: Evil\nslug: ../../escaped\n---\n\nBody.\n",
    )
    .unwrap();

    let site = Site::new(temp.path()).unwrap();
    let err = site.build().unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContentError>(),
        Some(ContentError::InvalidSlug { .. })
    ));
    assert!(!site.public_dir.exists());
}

#[test]
fn test_page_cannot_shadow_feed() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("content")).unwrap();
    fs::write(
        temp.path().join("content/feed.md"),
        "---\ntitle: Feed\nslug: atom.xml\n---\n",
    )
    .unwrap();

    let site = Site::new(temp.path()).unwrap();
    assert!(site.build().is_err());
    assert!(!site.public_dir.join("atom.xml").exists());
}

#[test]
fn test_free_text_is_escaped() {
    let temp = TempDir::new().unwrap();
    let writings = temp.path().join("content/writings");
    fs::create_dir_all(&writings).unwrap();
    fs::write(
        writings.join("a.md"),
        "---\ntitle: A\ndate: 2024-01-01\ntags: \"<script>x</script>\"\nreadTime: \"<b>2</b>\"\n---\n\nBody.\n",
    )
    .unwrap();
    fs::write(
        temp.path().join("content/uses.md"),
        "---\ntitle: \"<i>Uses</i>\"\n---\n\nDesk.\n",
    )
    .unwrap();

    let site = Site::new(temp.path()).unwrap();
    site.build().unwrap();

    let post = read(&site, "writings/a/index.html");
    assert!(!post.contains("<script>x</script>"));
    assert!(post.contains("&lt;script&gt;x"));
    assert!(!post.contains("<b>2</b>"));
    assert!(post.contains("&lt;b&gt;2"));
    assert!(!post.contains("<i>Uses</i>"));
    assert!(post.contains("&lt;i&gt;Uses"));

    let home = read(&site, "index.html");
    assert!(!home.contains("<b>2</b>"));
    assert!(!home.contains("<i>Uses</i>"));
}
