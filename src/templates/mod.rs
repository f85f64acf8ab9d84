//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary; a site only supplies content,
//! data files and optional static assets.

pub mod icons;

use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::data::Icon;
use crate::helpers;

/// Default stylesheet, written to `css/style.css` unless the site ships one
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Paths and rendered markdown go out as-is; free text is escaped
        // explicitly in the templates
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("home.html", include_str!("site/home.html")),
            ("writings.html", include_str!("site/writings.html")),
            ("post.html", include_str!("site/post.html")),
            ("projects.html", include_str!("site/projects.html")),
            ("page.html", include_str!("site/page.html")),
            ("about.html", include_str!("site/about.html")),
            // Partials
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/footer.html",
                include_str!("site/partials/footer.html"),
            ),
            ("macros.html", include_str!("site/macros.html")),
        ])?;

        tera.register_filter("truncate_chars", truncate_chars_filter);
        tera.register_filter("date_format", date_format_filter);
        tera.register_filter("icon_class", icon_class_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };

    Ok(tera::Value::String(helpers::truncate(&s, length, &omission)))
}

/// Tera filter: format a `YYYY-MM-DD` date with a moment-style format
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "YYYY-MM-DD".to_string(),
    };

    let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d")
        .map_err(|e| tera::Error::msg(format!("date_format: {:?} is not a date: {}", s, e)))?;
    Ok(tera::Value::String(helpers::format_date(date, &format)))
}

/// Tera filter: resolve a technology icon identifier to its CSS class
fn icon_class_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let icon: Icon = serde_json::from_value(value.clone()).unwrap_or(Icon::Other);
    Ok(tera::Value::String(icons::icon_class(icon).to_string()))
}

/// Site-wide values available to every template as `site`
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub root: String,
    pub date_format: String,
    pub stylesheet: String,
    pub feed: String,
    pub menu: Vec<MenuItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}
