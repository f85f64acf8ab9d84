use serde::{Deserialize, Serialize};

/// A project card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub link: String,
    #[serde(default)]
    pub repo: Option<String>,
    /// Names of the technologies used, shown as badges
    #[serde(default)]
    pub tech: Vec<String>,
    /// Featured projects are shown first on the home page
    #[serde(default)]
    pub featured: bool,
}
