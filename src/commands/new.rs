//! Create a new writing

use anyhow::{bail, Result};
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create a new writing under the writings directory, returning its path.
///
/// The slug defaults to the slugified title and doubles as the file name.
pub fn create_post(site: &Site, title: &str, slug: Option<&str>) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        bail!("Cannot derive a slug from {:?}", title);
    }

    let target_dir = site.writings_dir();
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().date_naive();
    let content = format!(
        "---\ntitle: {}\ndate: {}\nslug: {}\ntags:\n---\n",
        serde_yaml::to_string(title)?.trim_end(),
        today.format("%Y-%m-%d"),
        slug
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
