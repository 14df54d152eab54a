//! CSV reporter
//!
//! One row per entry, in view order. The file starts with a UTF-8 BOM so
//! spreadsheet tools pick the right encoding, and no cell contains a raw
//! line break.

use crate::criteria::default_criteria;
use crate::config::CriteriaConfig;
use crate::report::ReportView;
use crate::reporters::meta_len;
use anyhow::{anyhow, Context, Result};

const BOM: &str = "\u{feff}";

/// Metric columns appended after the per-criterion columns
const METRIC_COLUMNS: &[&str] = &[
    "word_count",
    "heading_count",
    "list_count",
    "table_count",
    "meta_len",
    "recommendations",
];

/// Column names, in order
pub fn header() -> Vec<String> {
    let mut columns: Vec<String> = ["url", "title", "total_score", "band"]
        .iter()
        .map(|c| c.to_string())
        .collect();
    for criterion in default_criteria(&CriteriaConfig::default()) {
        columns.push(criterion.key().to_string());
        columns.push(format!("{}_detail", criterion.key()));
    }
    columns.extend(METRIC_COLUMNS.iter().map(|c| c.to_string()));
    columns
}

/// Replace line breaks so each record stays on one line
fn clean(value: &str) -> String {
    value
        .split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render view as CSV
pub fn render(view: &ReportView<'_>) -> Result<String> {
    let mut writer = ::csv::Writer::from_writer(Vec::new());
    writer.write_record(header()).context("Failed to write CSV header")?;

    for score in view.iter() {
        let mut row = vec![
            clean(score.url()),
            clean(score.title()),
            score.total_score().to_string(),
            score.band().to_string(),
        ];
        for result in score.criteria() {
            row.push(if result.passed { "1" } else { "0" }.to_string());
            row.push(clean(&result.detail));
        }

        let outline = score.article().outline();
        let measured = |key: &str| {
            score
                .criterion_by_key(key)
                .map(|c| c.measured)
                .unwrap_or(0)
                .to_string()
        };
        row.push(measured("word_count"));
        row.push(measured("headings"));
        row.push(outline.lists.len().to_string());
        row.push(outline.tables.len().to_string());
        row.push(meta_len(score).to_string());
        row.push(score.recommendations().join(" | "));

        writer
            .write_record(&row)
            .with_context(|| format!("Failed to write CSV row for {}", score.url()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV: {}", e.error()))?;
    let body = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;
    Ok(format!("{BOM}{body}"))
}
