//! Core data models for geo-audit
//!
//! These models are shared by the scoring engine, the report model and
//! every output adapter.

use crate::parsers::{parse_body, Outline};
use serde::Serialize;
use std::sync::Arc;

/// Number of GEO criteria every article is scored against
pub const CRITERIA_COUNT: usize = 10;

/// Highest possible total score
pub const MAX_SCORE: u8 = CRITERIA_COUNT as u8;

/// A normalized article, independent of the source it was ingested from.
///
/// `body_text` and the structural [`Outline`] are derived from `body_html`
/// once, at construction. Fields are read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Article {
    url: String,
    title: String,
    #[serde(skip)]
    body_html: String,
    body_text: String,
    meta_description: Option<String>,
    #[serde(skip)]
    outline: Outline,
}

impl Article {
    /// Build an article, deriving plain text and outline from the markup
    pub fn new(
        url: impl Into<String>,
        title: impl Into<String>,
        body_html: impl Into<String>,
        meta_description: Option<String>,
    ) -> Self {
        let body_html = body_html.into();
        let parsed = parse_body(&body_html);
        Self {
            url: url.into(),
            title: title.into(),
            body_html,
            body_text: parsed.text,
            meta_description,
            outline: parsed.outline,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body_html(&self) -> &str {
        &self.body_html
    }

    /// Markup-free, whitespace-collapsed body text
    pub fn body_text(&self) -> &str {
        &self.body_text
    }

    pub fn meta_description(&self) -> Option<&str> {
        self.meta_description.as_deref()
    }

    /// Structure extracted from the body markup
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// Host of the article URL with any leading `www.` removed
    pub fn host(&self) -> Option<String> {
        url::Url::parse(self.url.trim())
            .ok()
            .and_then(|u| u.host_str().map(normalize_host))
    }
}

/// Lowercase a host name and drop a leading `www.`
pub fn normalize_host(host: &str) -> String {
    let host = host.to_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

/// Outcome of one criterion for one article
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionResult {
    pub criterion_id: u8,
    pub key: &'static str,
    pub name: &'static str,
    pub passed: bool,
    /// Measured value vs threshold, e.g. "412 words, need ≥500"
    pub detail: String,
    /// Primary measured quantity (word count, heading count, ...)
    pub measured: usize,
    /// Suggested fix, only present when the criterion failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<&'static str>,
}

/// Score of one article: ten criterion results in id order plus their total
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleScore {
    article: Arc<Article>,
    criteria: Vec<CriterionResult>,
    total_score: u8,
}

impl ArticleScore {
    /// Assemble a score from results already ordered by criterion id.
    ///
    /// # Panics
    /// If `criteria` is not exactly ids `1..=10` in order. That is a bug in
    /// the caller, never a data-quality problem.
    pub fn new(article: Arc<Article>, criteria: Vec<CriterionResult>) -> Self {
        assert_eq!(
            criteria.len(),
            CRITERIA_COUNT,
            "ArticleScore requires exactly {} criterion results",
            CRITERIA_COUNT
        );
        for (expected, result) in (1..=MAX_SCORE).zip(&criteria) {
            assert_eq!(
                result.criterion_id, expected,
                "criterion results must be ordered by id"
            );
        }

        let total_score = criteria.iter().filter(|c| c.passed).count() as u8;
        Self {
            article,
            criteria,
            total_score,
        }
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn criteria(&self) -> &[CriterionResult] {
        &self.criteria
    }

    pub fn total_score(&self) -> u8 {
        self.total_score
    }

    pub fn url(&self) -> &str {
        self.article.url()
    }

    pub fn title(&self) -> &str {
        self.article.title()
    }

    /// Result for a criterion id (1-based)
    pub fn criterion(&self, id: u8) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.criterion_id == id)
    }

    /// Result for a criterion key such as `word_count`
    pub fn criterion_by_key(&self, key: &str) -> Option<&CriterionResult> {
        self.criteria.iter().find(|c| c.key == key)
    }

    /// Recommendations of all failed criteria, in criterion order
    pub fn recommendations(&self) -> Vec<&'static str> {
        self.criteria
            .iter()
            .filter_map(|c| c.recommendation)
            .collect()
    }

    /// Score band of this entry
    pub fn band(&self) -> crate::scoring::ScoreBand {
        crate::scoring::band_of(self)
    }
}
