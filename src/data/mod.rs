//! Static site metadata - projects and technologies
//!
//! Both live as YAML lists in the data directory (`data/projects.yml`,
//! `data/technologies.yml`). A missing file is an empty list.

mod project;
mod technology;

pub use project::Project;
pub use technology::{Icon, Technology};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::Site;

/// Static metadata bound into pages alongside the writings
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    pub projects: Vec<Project>,
    pub technologies: Vec<Technology>,
}

impl SiteData {
    /// Load projects and technologies from the site's data directory
    pub fn load(site: &Site) -> Result<Self> {
        let projects = load_list(&site.data_dir.join("projects.yml"))?;
        let technologies = load_list(&site.data_dir.join("technologies.yml"))?;

        tracing::debug!(
            "Loaded {} projects and {} technologies",
            projects.len(),
            technologies.len()
        );

        Ok(Self {
            projects,
            technologies,
        })
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::debug!("No data file at {:?}", path);
        return Ok(Vec::new());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_site_data() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(
            data_dir.join("projects.yml"),
            r#"
- title: folio
  description: This very site.
  link: https://example.com/folio
  tech: [Rust]
"#,
        )
        .unwrap();
        fs::write(
            data_dir.join("technologies.yml"),
            r#"
- name: Rust
  icon: rust
  link: https://www.rust-lang.org
- name: Zig
  icon: zig
  link: https://ziglang.org
"#,
        )
        .unwrap();

        let site = Site::new(temp.path()).unwrap();
        let data = SiteData::load(&site).unwrap();
        assert_eq!(data.projects.len(), 1);
        assert_eq!(data.projects[0].tech, vec!["Rust"]);
        assert_eq!(data.technologies[0].icon, Icon::Rust);
        assert_eq!(data.technologies[1].icon, Icon::Other);
    }

    #[test]
    fn test_missing_files_are_empty() {
        let temp = TempDir::new().unwrap();
        let site = Site::new(temp.path()).unwrap();
        let data = SiteData::load(&site).unwrap();
        assert!(data.projects.is_empty());
        assert!(data.technologies.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("data");
        fs::create_dir_all(&data_dir).unwrap();
        fs::write(data_dir.join("projects.yml"), "- description: no title\n").unwrap();

        let site = Site::new(temp.path()).unwrap();
        let err = SiteData::load(&site).unwrap_err();
        assert!(err.to_string().contains("projects.yml"));
    }
}
