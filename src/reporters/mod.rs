//! Output reporters for geo-audit results
//!
//! Supports multiple output formats:
//! - `csv` - One row per article with per-criterion columns (UTF-8 with BOM)
//! - `html` - Standalone interactive table with search, sorting and paging
//! - `json` - Machine-readable summary plus per-article results
//! - `text` - Terminal summary with colors

mod csv;
mod html;
mod json;
mod text;

use crate::report::ReportView;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Html,
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "html" | "htm" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: csv, html, json, text",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Settings shared by the renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Initial rows per page in the HTML report (0 = all)
    pub page_size: usize,
    /// Number of lowest-scoring articles listed in the terminal summary
    pub weakest: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            weakest: 5,
        }
    }
}

/// Render a view, in its current order, in the specified format
pub fn render(view: &ReportView<'_>, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Csv => csv::render(view),
        OutputFormat::Html => html::render(view, options),
        OutputFormat::Json => json::render(view),
        OutputFormat::Text => text::render(view, options),
    }
}

/// Character length of an article's trimmed meta description
pub(crate) fn meta_len(score: &crate::models::ArticleScore) -> usize {
    score
        .article()
        .meta_description()
        .map(|m| m.trim().chars().count())
        .unwrap_or(0)
}
