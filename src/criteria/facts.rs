//! Facts and numbers
//!
//! Concrete numbers make an article quotable. Strict mode only counts
//! numbers carrying a unit or percent sign, so years and list indices do
//! not qualify.

use crate::criteria::base::{plural, Criterion, Evaluation};
use crate::models::Article;
use regex::Regex;
use std::sync::OnceLock;

fn number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+(?:[.,]\d+)?").expect("valid regex"))
}

fn unit_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\d+(?:[.,]\d+)?\s?(?:%|(?:mg|kg|kcal|ml|mcg|g|km|cm|m|min|h|eur|usd)\b|€|\$)")
            .expect("valid regex")
    })
}

pub struct FactsCriterion {
    min_numbers: usize,
    strict: bool,
}

impl FactsCriterion {
    pub fn new(min_numbers: usize, strict: bool) -> Self {
        Self {
            min_numbers,
            strict,
        }
    }
}

impl Criterion for FactsCriterion {
    fn id(&self) -> u8 {
        4
    }

    fn key(&self) -> &'static str {
        "facts"
    }

    fn name(&self) -> &'static str {
        "Facts and numbers"
    }

    fn description(&self) -> &'static str {
        "Body contains concrete numbers"
    }

    fn recommendation(&self) -> &'static str {
        "Add concrete numbers: doses, percentages, amounts, durations or study results."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let text = article.body_text();
        let (count, noun) = if self.strict {
            (unit_number_regex().find_iter(text).count(), "number with unit")
        } else {
            (number_regex().find_iter(text).count(), "numeral")
        };

        let noun_phrase = if count == 1 || !self.strict {
            plural(count, noun)
        } else {
            format!("{count} numbers with units")
        };

        Evaluation::from_check(
            count >= self.min_numbers,
            format!("{noun_phrase}, need ≥{}", self.min_numbers),
            count,
        )
    }
}
