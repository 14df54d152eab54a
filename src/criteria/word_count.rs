//! Sufficient length

use crate::criteria::base::{Criterion, Evaluation};
use crate::models::Article;
use crate::parsers::count_words;

pub struct WordCountCriterion {
    min_words: usize,
}

impl WordCountCriterion {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }
}

impl Criterion for WordCountCriterion {
    fn id(&self) -> u8 {
        9
    }

    fn key(&self) -> &'static str {
        "word_count"
    }

    fn name(&self) -> &'static str {
        "Sufficient length"
    }

    fn description(&self) -> &'static str {
        "Body has enough words to cover the topic"
    }

    fn recommendation(&self) -> &'static str {
        "Expand the article with practical details and examples."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let words = count_words(article.body_text());
        Evaluation::from_check(
            words >= self.min_words,
            format!("{words} words, need ≥{}", self.min_words),
            words,
        )
    }
}
