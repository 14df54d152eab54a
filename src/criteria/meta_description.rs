//! Meta description length
//!
//! Length is measured in characters (not bytes) after trimming.

use crate::criteria::base::{Criterion, Evaluation};
use crate::models::Article;

pub struct MetaDescriptionCriterion {
    min_len: usize,
    max_len: usize,
}

impl MetaDescriptionCriterion {
    pub fn new(min_len: usize, max_len: usize) -> Self {
        Self { min_len, max_len }
    }
}

impl Criterion for MetaDescriptionCriterion {
    fn id(&self) -> u8 {
        10
    }

    fn key(&self) -> &'static str {
        "meta_description"
    }

    fn name(&self) -> &'static str {
        "Meta description"
    }

    fn description(&self) -> &'static str {
        "Meta description present with a search-friendly length"
    }

    fn recommendation(&self) -> &'static str {
        "Write a meta description of 120-160 characters that summarizes the answer."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let meta = article.meta_description().map(str::trim).unwrap_or("");
        if meta.is_empty() {
            return Evaluation::fail(
                format!(
                    "No meta description (need {}-{} characters)",
                    self.min_len, self.max_len
                ),
                0,
            );
        }

        let len = meta.chars().count();
        Evaluation::from_check(
            (self.min_len..=self.max_len).contains(&len),
            format!(
                "{len} characters, need {}-{}",
                self.min_len, self.max_len
            ),
            len,
        )
    }
}
