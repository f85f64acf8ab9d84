//! Helper functions shared by the content pipeline and the templates

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
