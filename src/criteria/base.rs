//! Base criterion trait and types
//!
//! This module defines the core abstractions for GEO criteria:
//! - `Criterion` trait that all ten rules implement
//! - `Evaluation` for capturing one rule's verdict on one article

use crate::models::{Article, CriterionResult};

/// Verdict of a single criterion, before the engine attaches identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub passed: bool,
    /// Human-readable measured value vs threshold
    pub detail: String,
    /// Primary measured quantity
    pub measured: usize,
}

impl Evaluation {
    /// Create a passing evaluation
    pub fn pass(detail: impl Into<String>, measured: usize) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
            measured,
        }
    }

    /// Create a failing evaluation
    pub fn fail(detail: impl Into<String>, measured: usize) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
            measured,
        }
    }

    /// Pass or fail depending on `passed`
    pub fn from_check(passed: bool, detail: impl Into<String>, measured: usize) -> Self {
        if passed {
            Self::pass(detail, measured)
        } else {
            Self::fail(detail, measured)
        }
    }
}

/// Trait for all GEO criteria
///
/// Criteria inspect a normalized article and decide whether it satisfies
/// one structural property, such as:
/// - A direct answer in the intro
/// - Structured headings
/// - Sufficient length
/// - A meta description of the right size
///
/// Implementations must be pure: no shared mutable state, no I/O, and no
/// panics on empty or malformed input. Missing data simply fails the
/// criterion with a detail that says what was measured.
///
/// # Example Implementation
///
/// ```ignore
/// pub struct MyCriterion;
///
/// impl Criterion for MyCriterion {
///     fn id(&self) -> u8 { 11 }
///     fn key(&self) -> &'static str { "my_criterion" }
///     fn name(&self) -> &'static str { "My criterion" }
///     fn description(&self) -> &'static str { "Checks my property" }
///     fn recommendation(&self) -> &'static str { "Add my property." }
///
///     fn evaluate(&self, article: &Article) -> Evaluation {
///         Evaluation::fail("Not implemented", 0)
///     }
/// }
/// ```
pub trait Criterion: Send + Sync {
    /// Position in the fixed criterion order (1-based)
    fn id(&self) -> u8;

    /// Stable machine key, used as CSV column name
    fn key(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// What the criterion checks
    fn description(&self) -> &'static str;

    /// Suggested fix shown when the criterion fails
    fn recommendation(&self) -> &'static str;

    /// Evaluate one article
    fn evaluate(&self, article: &Article) -> Evaluation;

    /// Evaluate and attach this criterion's identity to the verdict
    fn check(&self, article: &Article) -> CriterionResult {
        let evaluation = self.evaluate(article);
        CriterionResult {
            criterion_id: self.id(),
            key: self.key(),
            name: self.name(),
            passed: evaluation.passed,
            detail: evaluation.detail,
            measured: evaluation.measured,
            recommendation: if evaluation.passed {
                None
            } else {
                Some(self.recommendation())
            },
        }
    }
}

/// Pluralize a count: `plural(1, "heading")` -> "1 heading"
pub(crate) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
