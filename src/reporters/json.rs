//! JSON reporter
//!
//! Outputs the view summary plus every entry with its criterion results.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::{ArticleScore, CriterionResult};
use crate::report::{ReportSummary, ReportView};
use crate::reporters::meta_len;
use crate::scoring::ScoreBand;
use anyhow::Result;
use chrono::Local;
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    summary: ReportSummary,
    articles: Vec<JsonEntry<'a>>,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    url: &'a str,
    title: &'a str,
    total_score: u8,
    band: ScoreBand,
    meta_len: usize,
    criteria: &'a [CriterionResult],
    recommendations: Vec<&'static str>,
}

impl<'a> JsonEntry<'a> {
    fn new(score: &'a ArticleScore) -> Self {
        Self {
            url: score.url(),
            title: score.title(),
            total_score: score.total_score(),
            band: score.band(),
            meta_len: meta_len(score),
            criteria: score.criteria(),
            recommendations: score.recommendations(),
        }
    }
}

fn build<'a>(view: &ReportView<'a>) -> JsonReport<'a> {
    JsonReport {
        generated_at: Local::now().to_rfc3339(),
        summary: view.summary(),
        articles: view.iter().map(JsonEntry::new).collect(),
    }
}

/// Render view as JSON
pub fn render(view: &ReportView<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&build(view))?)
}
