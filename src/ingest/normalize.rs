//! Normalization of JSON article objects
//!
//! Two shapes are accepted and may be mixed in one file:
//! - snapshot objects: `url`, `title`, `content_html`, `meta_description`
//! - WordPress posts: `link`, `title.rendered`, `content.rendered`,
//!   `yoast_head_json.description`, with `excerpt.rendered` as meta fallback

use crate::ingest::IngestError;
use crate::models::Article;
use crate::parsers::html_to_text;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::Value;

/// Title used when an item has none
pub const UNTITLED: &str = "(no title)";

/// A string, a `{"rendered": ...}` object, or anything else (ignored)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextField {
    Plain(String),
    Rendered {
        #[serde(default)]
        rendered: Option<String>,
    },
    Other(IgnoredAny),
}

impl TextField {
    fn text(&self) -> Option<&str> {
        match self {
            TextField::Plain(s) => Some(s),
            TextField::Rendered { rendered } => rendered.as_deref(),
            TextField::Other(_) => None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Yoast {
    #[serde(default)]
    description: Option<TextField>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    url: Option<TextField>,
    #[serde(default)]
    link: Option<TextField>,
    #[serde(default)]
    title: Option<TextField>,
    #[serde(default)]
    content: Option<TextField>,
    #[serde(default)]
    content_html: Option<TextField>,
    #[serde(default)]
    meta_description: Option<TextField>,
    #[serde(default)]
    yoast_head_json: Option<Yoast>,
    #[serde(default)]
    excerpt: Option<TextField>,
}

fn field_text(field: &Option<TextField>) -> Option<&str> {
    field.as_ref().and_then(TextField::text)
}

/// Decoded, trimmed text of the first non-empty field
fn first_text<'a>(fields: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    fields
        .into_iter()
        .flatten()
        .map(html_to_text)
        .find(|s| !s.is_empty())
}

/// Normalize one JSON item (at position `index`) into an article
pub fn normalize_item(index: usize, item: Value) -> Result<Article, IngestError> {
    if !item.is_object() {
        return Err(IngestError::NotAnObject { index });
    }
    let raw: RawItem =
        serde_json::from_value(item).map_err(|source| IngestError::InvalidItem { index, source })?;

    let url = [field_text(&raw.url), field_text(&raw.link)]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .ok_or(IngestError::MissingUrl { index })?
        .to_string();

    let title = first_text([field_text(&raw.title)]).unwrap_or_else(|| UNTITLED.to_string());

    // markup is kept as-is: the criteria read its structure
    let body_html = [field_text(&raw.content_html), field_text(&raw.content)]
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
        .unwrap_or("")
        .to_string();

    let meta = first_text([
        field_text(&raw.meta_description),
        raw.yoast_head_json
            .as_ref()
            .and_then(|y| field_text(&y.description)),
        field_text(&raw.excerpt),
    ]);

    Ok(Article::new(url, title, body_html, meta))
}
