//! Structured headings
//!
//! Counts H2-H4 headings and checks that the hierarchy never skips a
//! level. The article title counts as the H1 the hierarchy starts from.

use crate::criteria::base::{plural, Criterion, Evaluation};
use crate::models::Article;

pub struct HeadingsCriterion {
    min_headings: usize,
}

impl HeadingsCriterion {
    pub fn new(min_headings: usize) -> Self {
        Self { min_headings }
    }
}

/// First heading that jumps more than one level deeper than its predecessor
fn first_skip<'a>(headings: impl Iterator<Item = (u8, &'a str)>) -> Option<(u8, u8, &'a str)> {
    let mut prev = 1u8;
    for (level, text) in headings {
        match level {
            1 => prev = 1,
            2..=4 => {
                if level > prev + 1 {
                    return Some((prev, level, text));
                }
                prev = level;
            }
            _ => {}
        }
    }
    None
}

impl Criterion for HeadingsCriterion {
    fn id(&self) -> u8 {
        3
    }

    fn key(&self) -> &'static str {
        "headings"
    }

    fn name(&self) -> &'static str {
        "Structured headings"
    }

    fn description(&self) -> &'static str {
        "Enough H2-H4 headings, with no skipped levels"
    }

    fn recommendation(&self) -> &'static str {
        "Split the article into sections with H2/H3 headings and keep the hierarchy consistent."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let outline = article.outline();
        let count = outline
            .headings()
            .filter(|(level, _)| (2..=4).contains(level))
            .count();

        if count < self.min_headings {
            return Evaluation::fail(
                format!(
                    "{} (H2-H4), need ≥{}",
                    plural(count, "heading"),
                    self.min_headings
                ),
                count,
            );
        }

        if let Some((prev, level, text)) = first_skip(outline.headings()) {
            return Evaluation::fail(
                format!("{}, but H{level} \"{text}\" follows H{prev}", plural(count, "heading")),
                count,
            );
        }

        Evaluation::pass(
            format!(
                "{} (H2-H4), need ≥{}, hierarchy consistent",
                plural(count, "heading"),
                self.min_headings
            ),
            count,
        )
    }
}
