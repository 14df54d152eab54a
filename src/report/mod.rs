//! Report model
//!
//! A [`Report`] owns the scored articles of one run, in ingestion order.
//! Everything the outputs need (filtering, sorting, paging, band
//! classification, aggregates) is a non-mutating view operation that
//! borrows from the report:
//!
//! ```text
//! Report ──filter──▶ ReportView ──sort──▶ ReportView ──paginate──▶ ReportView
//! ```

pub mod filters;

use crate::config::CriteriaConfig;
use crate::criteria::default_criteria;
use crate::models::ArticleScore;
use crate::scoring::ScoreBand;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field a view can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Case-insensitive title
    Title,
    Url,
    TotalScore,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Url => "url",
            SortKey::TotalScore => "score",
        }
    }

    fn compare(&self, a: &ArticleScore, b: &ArticleScore) -> Ordering {
        match self {
            SortKey::Title => a.title().to_lowercase().cmp(&b.title().to_lowercase()),
            SortKey::Url => a.url().cmp(b.url()),
            SortKey::TotalScore => a.total_score().cmp(&b.total_score()),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "url" => Ok(SortKey::Url),
            "score" | "total" | "total_score" => Ok(SortKey::TotalScore),
            _ => Err(format!("Unknown sort key '{}'. Valid: title, url, score", s)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(format!("Unknown sort order '{}'. Valid: asc, desc", s)),
        }
    }
}

/// One level of a multi-key ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }

    fn compare(&self, a: &ArticleScore, b: &ArticleScore) -> Ordering {
        let ord = self.key.compare(a, b);
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Scored articles of one run
#[derive(Debug, Clone, Default)]
pub struct Report {
    entries: Vec<ArticleScore>,
}

/// Build a report from scores, keeping their order
pub fn build_report(scores: Vec<ArticleScore>) -> Report {
    Report::build(scores)
}

impl Report {
    pub fn build(scores: Vec<ArticleScore>) -> Self {
        Self { entries: scores }
    }

    pub fn entries(&self) -> &[ArticleScore] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// View over all entries in report order
    pub fn view(&self) -> ReportView<'_> {
        ReportView {
            entries: self.entries.iter().collect(),
        }
    }

    pub fn filter(&self, predicate: impl Fn(&ArticleScore) -> bool) -> ReportView<'_> {
        self.view().filter(predicate)
    }

    pub fn sort(&self, key: SortKey, direction: SortDirection) -> ReportView<'_> {
        self.view().sort(key, direction)
    }

    pub fn sort_by(&self, specs: &[SortSpec]) -> ReportView<'_> {
        self.view().sort_by(specs)
    }

    pub fn paginate(&self, page_size: usize, page_index: usize) -> ReportView<'_> {
        self.view().paginate(page_size, page_index)
    }

    pub fn summary(&self) -> ReportSummary {
        self.view().summary()
    }
}

/// Borrowed, ordered subset of a report's entries
#[derive(Debug, Clone, Default)]
pub struct ReportView<'a> {
    entries: Vec<&'a ArticleScore>,
}

impl<'a> ReportView<'a> {
    /// Entries matching `predicate`, order kept
    pub fn filter(&self, predicate: impl Fn(&ArticleScore) -> bool) -> ReportView<'a> {
        ReportView {
            entries: self
                .entries
                .iter()
                .copied()
                .filter(|score| predicate(score))
                .collect(),
        }
    }

    /// Stable sort on one key
    pub fn sort(&self, key: SortKey, direction: SortDirection) -> ReportView<'a> {
        self.sort_by(&[SortSpec { key, direction }])
    }

    /// Stable sort on several keys; later specs break ties of earlier ones
    pub fn sort_by(&self, specs: &[SortSpec]) -> ReportView<'a> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            specs
                .iter()
                .map(|spec| spec.compare(a, b))
                .find(|ord| ord.is_ne())
                .unwrap_or(Ordering::Equal)
        });
        ReportView { entries }
    }

    /// Page `page_index` (zero-based) of `page_size` entries.
    ///
    /// A page past the end is empty. `page_size == 0` disables paging:
    /// page 0 holds every entry and all other pages are empty.
    pub fn paginate(&self, page_size: usize, page_index: usize) -> ReportView<'a> {
        if page_size == 0 {
            return if page_index == 0 {
                self.clone()
            } else {
                ReportView::default()
            };
        }
        let entries = self
            .entries
            .chunks(page_size)
            .nth(page_index)
            .map(<[_]>::to_vec)
            .unwrap_or_default();
        ReportView { entries }
    }

    /// Number of pages for `page_size` (at least 1, even when empty)
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 1;
        }
        self.entries.len().div_ceil(page_size).max(1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ArticleScore> + '_ {
        self.entries.iter().copied()
    }

    pub fn entries(&self) -> &[&'a ArticleScore] {
        &self.entries
    }

    /// Aggregates over the entries of this view
    pub fn summary(&self) -> ReportSummary {
        let total = self.entries.len();
        let score_sum: usize = self
            .entries
            .iter()
            .map(|s| usize::from(s.total_score()))
            .sum();
        let average_score = if total == 0 {
            0.0
        } else {
            score_sum as f64 / total as f64
        };

        let band_counts = ScoreBand::ALL
            .iter()
            .map(|&band| BandCount {
                band,
                count: self.entries.iter().filter(|s| s.band() == band).count(),
            })
            .collect();

        let criteria = default_criteria(&CriteriaConfig::default())
            .iter()
            .map(|criterion| CriterionStats {
                criterion_id: criterion.id(),
                key: criterion.key(),
                name: criterion.name(),
                description: criterion.description(),
                passed: self
                    .entries
                    .iter()
                    .filter(|s| {
                        s.criterion(criterion.id())
                            .is_some_and(|result| result.passed)
                    })
                    .count(),
            })
            .collect();

        ReportSummary {
            total_articles: total,
            average_score,
            average_band: ScoreBand::from_average(average_score),
            band_counts,
            criteria,
        }
    }
}

impl<'a> IntoIterator for ReportView<'a> {
    type Item = &'a ArticleScore;
    type IntoIter = std::vec::IntoIter<&'a ArticleScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandCount {
    pub band: ScoreBand,
    pub count: usize,
}

/// How many entries passed one criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionStats {
    pub criterion_id: u8,
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub passed: usize,
}

/// Aggregate statistics of a report or view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_articles: usize,
    pub average_score: f64,
    pub average_band: ScoreBand,
    /// Entry count per band, red to green
    pub band_counts: Vec<BandCount>,
    /// Pass counts per criterion, in criterion order
    pub criteria: Vec<CriterionStats>,
}

impl ReportSummary {
    pub fn band_count(&self, band: ScoreBand) -> usize {
        self.band_counts
            .iter()
            .find(|c| c.band == band)
            .map(|c| c.count)
            .unwrap_or(0)
    }
}
