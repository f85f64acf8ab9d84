//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::helpers::html_escape;

/// Marker separating a post's summary from the rest of its body
pub const SUMMARY_MARKER: &str = "<!-- more -->";

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme: Theme,
    line_numbers: bool,
}

/// A fenced or indented code block being collected
struct CodeBlock {
    lang: Option<String>,
    code: String,
}

impl MarkdownRenderer {
    /// Create a renderer using the given syntect theme name.
    ///
    /// Unknown theme names fall back to `base16-ocean.dark`.
    pub fn new(theme_name: &str, line_numbers: bool) -> Self {
        let mut themes = ThemeSet::load_defaults().themes;
        let theme = match themes.remove(theme_name) {
            Some(theme) => theme,
            None => {
                tracing::warn!("Unknown highlight theme {:?}, using default", theme_name);
                themes.remove("base16-ocean.dark").unwrap_or_default()
            }
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<String> {
        // Front-matter is stripped before this point, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES;

        let mut events: Vec<Event> = Vec::new();
        let mut block: Option<CodeBlock> = None;

        for event in Parser::new_ext(markdown, options) {
            if let Some(current) = block.as_mut() {
                match event {
                    Event::Text(text) => current.code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted =
                            self.highlight_code(&current.code, current.lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    block = Some(CodeBlock {
                        lang,
                        code: String::new(),
                    });
                }
                event => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let body = match highlighted_html_for_string(code, &self.syntax_set, syntax, &self.theme) {
            Ok(highlighted) => highlighted,
            Err(e) => {
                tracing::debug!("Highlighting {} failed: {}", lang, e);
                format!("<pre><code>{}</code></pre>", html_escape(code))
            }
        };

        if self.line_numbers {
            let gutter: Vec<String> = (1..=code.lines().count())
                .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
                .collect();
            format!(
                r#"<figure class="highlight {}"><div class="gutter"><pre>{}</pre></div>{}</figure>"#,
                lang,
                gutter.join("\n"),
                body
            )
        } else {
            format!(r#"<figure class="highlight {}">{}</figure>"#, lang, body)
        }
    }

    /// Split a body at the summary marker.
    ///
    /// Returns the summary (if the marker is present) and the body with the
    /// marker removed.
    pub fn split_summary(content: &str) -> (Option<&str>, String) {
        match content.split_once(SUMMARY_MARKER) {
            Some((summary, rest)) => (
                Some(summary.trim()),
                format!("{}\n\n{}", summary.trim(), rest.trim()),
            ),
            None => (None, content.to_string()),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new("base16-ocean.dark", false)
    }
}
