//! Bulleted or numbered lists

use crate::criteria::base::{plural, Criterion, Evaluation};
use crate::models::Article;

pub struct ListsCriterion {
    min_items: usize,
}

impl ListsCriterion {
    pub fn new(min_items: usize) -> Self {
        Self { min_items }
    }
}

impl Criterion for ListsCriterion {
    fn id(&self) -> u8 {
        7
    }

    fn key(&self) -> &'static str {
        "lists"
    }

    fn name(&self) -> &'static str {
        "Lists"
    }

    fn description(&self) -> &'static str {
        "At least one bulleted or numbered list"
    }

    fn recommendation(&self) -> &'static str {
        "Add a bulleted or numbered list (steps, benefits, summary)."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let lists = &article.outline().lists;
        let largest = lists.iter().map(|l| l.items).max().unwrap_or(0);
        let qualifying = lists.iter().filter(|l| l.items >= self.min_items).count();

        Evaluation::from_check(
            qualifying > 0,
            format!(
                "{}, largest has {}, need ≥{}",
                plural(lists.len(), "list"),
                plural(largest, "item"),
                self.min_items
            ),
            qualifying,
        )
    }
}
