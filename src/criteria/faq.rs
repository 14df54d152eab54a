//! FAQ section
//!
//! An FAQ counts when a FAQ-like heading is followed by at least one
//! question inside its section, when two questions appear back to back,
//! or when the page declares FAQPage structured data.

use crate::criteria::base::{Criterion, Evaluation};
use crate::models::Article;
use crate::parsers::{split_sentences, Block, BlockKind};

const FAQ_HEADING_MARKERS: &[&str] = &[
    "faq",
    "frequently asked",
    "questions",
    "otázky",
    "otazky",
    "časté otázky",
];

pub struct FaqCriterion;

fn is_faq_heading(text: &str) -> bool {
    let text = text.to_lowercase();
    FAQ_HEADING_MARKERS.iter().any(|m| text.contains(m))
}

/// Heading text of the first FAQ section containing a question
fn faq_section(blocks: &[Block]) -> Option<&str> {
    for (i, block) in blocks.iter().enumerate() {
        let Some(level) = block.heading_level() else {
            continue;
        };
        if !is_faq_heading(&block.text) {
            continue;
        }
        let has_question = blocks[i + 1..]
            .iter()
            .take_while(|b| b.heading_level().map_or(true, |l| l > level))
            .any(|b| b.is_question());
        if has_question {
            return Some(&block.text);
        }
    }
    None
}

/// Whether two question sentences appear one after another
fn has_consecutive_questions(text: &str) -> bool {
    split_sentences(text)
        .windows(2)
        .any(|pair| pair.iter().all(|s| s.ends_with('?')))
}

impl Criterion for FaqCriterion {
    fn id(&self) -> u8 {
        6
    }

    fn key(&self) -> &'static str {
        "faq"
    }

    fn name(&self) -> &'static str {
        "FAQ section"
    }

    fn description(&self) -> &'static str {
        "Frequently asked questions with answers"
    }

    fn recommendation(&self) -> &'static str {
        "Add an FAQ section with 3-5 questions and short answers."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let outline = article.outline();

        if let Some(heading) = faq_section(&outline.blocks) {
            return Evaluation::pass(format!("FAQ section \"{heading}\" with questions"), 1);
        }
        if outline.has_faq_schema {
            return Evaluation::pass("FAQPage structured data", 1);
        }
        if has_consecutive_questions(article.body_text()) {
            return Evaluation::pass("Consecutive question sentences in body", 1);
        }

        let questions = outline
            .blocks
            .iter()
            .filter(|b| b.kind != BlockKind::Paragraph && b.is_question())
            .count();
        Evaluation::fail(
            format!("No FAQ section ({questions} question headings or items)"),
            0,
        )
    }
}
