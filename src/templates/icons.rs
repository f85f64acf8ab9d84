//! Icon lookup table for technology entries
//!
//! Icons are rendered with devicon class names; the stylesheet that
//! provides them is linked from the page head.

use crate::data::Icon;

/// devicon class for an icon identifier
pub fn icon_class(icon: Icon) -> &'static str {
    match icon {
        Icon::Rust => "devicon-rust-original",
        Icon::TypeScript => "devicon-typescript-plain",
        Icon::JavaScript => "devicon-javascript-plain",
        Icon::Python => "devicon-python-plain",
        Icon::Go => "devicon-go-original-wordmark",
        Icon::Svelte => "devicon-svelte-plain",
        Icon::React => "devicon-react-original",
        Icon::Docker => "devicon-docker-plain",
        Icon::Linux => "devicon-linux-plain",
        Icon::Git => "devicon-git-plain",
        Icon::Postgres => "devicon-postgresql-plain",
        Icon::Neovim => "devicon-neovim-plain",
        Icon::Nix => "devicon-nixos-plain",
        Icon::Aws => "devicon-amazonwebservices-plain-wordmark",
        Icon::Other => "devicon-devicon-plain",
    }
}
