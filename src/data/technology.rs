use serde::{Deserialize, Serialize};

/// A technology in the grid on the home and about pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Technology {
    pub name: String,
    pub icon: Icon,
    pub link: String,
}

/// Icon identifier; the template layer owns the table that renders it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Rust,
    TypeScript,
    JavaScript,
    Python,
    Go,
    Svelte,
    React,
    Docker,
    Linux,
    Git,
    Postgres,
    Neovim,
    Nix,
    Aws,
    #[serde(other)]
    Other,
}
