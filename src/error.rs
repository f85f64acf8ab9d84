//! Content validation errors

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a markdown source cannot enter the content collection
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{}: missing `date` in front-matter", .path.display())]
    MissingDate { path: PathBuf },

    #[error("{}: cannot parse date {value:?}", .path.display())]
    InvalidDate { path: PathBuf, value: String },

    #[error("{}: slug {slug:?} is not URL-safe", .path.display())]
    InvalidSlug { path: PathBuf, slug: String },

    #[error("{}: /{slug}/ is a generated route", .path.display())]
    ReservedSlug { path: PathBuf, slug: String },

    #[error(
        "duplicate slug {slug:?} in {} and {}",
        .first.display(),
        .second.display()
    )]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Failed to parse front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}
