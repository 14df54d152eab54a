//! Ingestion adapters
//!
//! Each adapter turns one kind of source into normalized [`Article`]s:
//! - `json` - a snapshot file (list of articles or `{"articles": [...]}`)
//! - `wp` - the WordPress REST API, page by page
//! - `urls` - a text file with one page URL per line
//!
//! Problems with a single item (missing url, failed fetch, non-HTML page)
//! skip that item with a warning. Problems with the whole source
//! (unreadable file, invalid JSON) abort ingestion.

mod extract;
mod http;
mod json_file;
mod normalize;
mod urls;
mod wordpress;

pub use extract::extract_page;
pub use http::{Fetch, FetchedPage, HttpClient};
pub use normalize::normalize_item;
pub use wordpress::wp_page_url;

use crate::config::{AuditConfig, ConfigError};
use crate::models::Article;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Kind of article source
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceKind {
    /// JSON snapshot file
    Json,
    /// WordPress site or REST endpoint
    Wp,
    /// Text file with one URL per line
    Urls,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Json => write!(f, "json"),
            SourceKind::Wp => write!(f, "wp"),
            SourceKind::Urls => write!(f, "urls"),
        }
    }
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {origin}: {source}")]
    InvalidJson {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{origin} must contain a list of articles (or an object with 'articles')")]
    NotAList { origin: String },

    #[error("Item {index} is not an object")]
    NotAnObject { index: usize },

    #[error("Item {index} has an unexpected shape: {source}")]
    InvalidItem {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Item {index} has no url or link")]
    MissingUrl { index: usize },

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: ureq::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("{url} is not an HTML page (content type {content_type})")]
    NotHtml { url: String, content_type: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl IngestError {
    /// Whether the error aborts the whole source rather than one item
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IngestError::Read { .. }
                | IngestError::InvalidJson { .. }
                | IngestError::NotAList { .. }
                | IngestError::Config(_)
        )
    }
}

/// An item that could not be turned into an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// Where the item came from (index, page, url)
    pub origin: String,
    pub reason: String,
}

/// Articles loaded from one source plus the items that were skipped
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
    pub articles: Vec<Article>,
    pub skipped: Vec<SkippedItem>,
}

impl IngestOutcome {
    pub(crate) fn skip(&mut self, origin: impl Into<String>, error: &IngestError) {
        let origin = origin.into();
        tracing::warn!("Skipping {}: {}", origin, error);
        self.skipped.push(SkippedItem {
            origin,
            reason: error.to_string(),
        });
    }
}

/// Item-level progress callback: (item label)
pub type IngestProgress<'a> = &'a (dyn Fn(&str) + Sync);

/// A validated source: kind plus input path or endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    kind: SourceKind,
    input: String,
}

impl SourceSpec {
    /// Validate the input for `kind` before any I/O on the source itself
    pub fn new(kind: SourceKind, input: Option<&str>) -> Result<Self, ConfigError> {
        let input = input.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
            ConfigError::MissingInput {
                source_kind: kind.to_string(),
            }
        })?;

        match kind {
            SourceKind::Json | SourceKind::Urls => {
                if !Path::new(input).is_file() {
                    return Err(ConfigError::InputNotFound(PathBuf::from(input)));
                }
            }
            SourceKind::Wp => {
                wp_page_url(input, 1, 1)?;
            }
        }

        Ok(Self {
            kind,
            input: input.to_string(),
        })
    }

    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Load all articles from a source
pub fn ingest(
    spec: &SourceSpec,
    config: &AuditConfig,
    progress: Option<IngestProgress<'_>>,
) -> Result<IngestOutcome, IngestError> {
    info!("Ingesting {} source {}", spec.kind(), spec.input());
    let outcome = match spec.kind() {
        SourceKind::Json => json_file::load(Path::new(spec.input()))?,
        SourceKind::Wp => {
            let client = HttpClient::new(&config.http);
            wordpress::load(&client, spec.input(), &config.wordpress, progress)?
        }
        SourceKind::Urls => {
            let client = HttpClient::new(&config.http);
            urls::load(&client, Path::new(spec.input()), progress)?
        }
    };
    info!(
        "Ingested {} articles, skipped {}",
        outcome.articles.len(),
        outcome.skipped.len()
    );
    Ok(outcome)
}
