//! Direct answer in intro
//!
//! Answer engines lift the opening of an article. The intro passes when
//! its first sentence is a declarative statement of reasonable length,
//! not a question and not a "in this article we will..." opener.

use crate::criteria::base::{Criterion, Evaluation};
use crate::models::Article;
use crate::parsers::{count_words, prefix_chars, split_sentences};

/// Openers that announce content instead of answering
const FILLER_OPENERS: &[&str] = &[
    "in this article",
    "in this post",
    "in this guide",
    "in today's article",
    "we will look",
    "we'll look",
    "let's take a look",
    "let's look at",
    "you will learn",
    "you'll learn",
    "v tomto článku",
    "v tomto clanku",
    "pozrieme sa",
    "poďme sa pozrieť",
    "podme sa pozriet",
    "dozviete sa",
    "zistíte",
    "na úvod",
    "na uvod",
    "v dnešnom článku",
    "v dnesnom clanku",
    "predstavíme si",
    "predstavime si",
];

/// A `?` this early in the opening sentence makes it a question
const QUESTION_WINDOW_CHARS: usize = 120;

/// Filler openers are only looked for this close to the start
const FILLER_WINDOW_CHARS: usize = 150;

pub struct DirectAnswerCriterion {
    min_words: usize,
}

impl DirectAnswerCriterion {
    pub fn new(min_words: usize) -> Self {
        Self { min_words }
    }

    /// First paragraph, or the body text when the markup has none
    fn intro(article: &Article) -> &str {
        article
            .outline()
            .paragraphs()
            .next()
            .unwrap_or_else(|| article.body_text())
    }
}

impl Criterion for DirectAnswerCriterion {
    fn id(&self) -> u8 {
        1
    }

    fn key(&self) -> &'static str {
        "direct_answer"
    }

    fn name(&self) -> &'static str {
        "Direct answer in intro"
    }

    fn description(&self) -> &'static str {
        "Opening sentence states an answer instead of a question or filler"
    }

    fn recommendation(&self) -> &'static str {
        "Open with a direct answer in the first one or two sentences, without filler or questions."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let intro = Self::intro(article).trim();
        let Some(first) = split_sentences(intro).into_iter().next() else {
            return Evaluation::fail("Body is empty, 0 words in intro", 0);
        };

        let words = count_words(first);
        let is_question =
            first.ends_with('?') || prefix_chars(first, QUESTION_WINDOW_CHARS).contains('?');
        if is_question {
            return Evaluation::fail(
                format!("Intro opens with a question ({words} words)"),
                words,
            );
        }

        let opening = prefix_chars(intro, FILLER_WINDOW_CHARS).to_lowercase();
        if let Some(filler) = FILLER_OPENERS.iter().find(|p| opening.contains(*p)) {
            return Evaluation::fail(format!("Intro opens with filler \"{filler}\""), words);
        }

        Evaluation::from_check(
            words >= self.min_words,
            format!(
                "First sentence has {words} words, need ≥{}",
                self.min_words
            ),
            words,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::tests::article_with_body;

    fn check(html: &str) -> Evaluation {
        DirectAnswerCriterion::new(6).evaluate(&article_with_body(html))
    }

    #[test]
    fn test_declarative_intro_passes() {
        let eval = check("<p>Creatine improves short bursts of strength in most adults. More text.</p>");
        assert!(eval.passed, "{}", eval.detail);
        assert_eq!(eval.measured, 9);
    }

    #[test]
    fn test_question_intro_fails() {
        let eval = check("<p>Should you take creatine every day? Yes, most people can.</p>");
        assert!(!eval.passed);
        assert!(eval.detail.contains("question"));
    }

    #[test]
    fn test_filler_intro_fails() {
        let eval = check("<p>In this article we explain everything about creatine and dosing.</p>");
        assert!(!eval.passed);
        assert!(eval.detail.contains("in this article"));
    }

    #[test]
    fn test_slovak_filler_fails() {
        let eval = check("<p>V tomto článku sa pozrieme na kreatín a jeho účinky na telo.</p>");
        assert!(!eval.passed);
    }

    #[test]
    fn test_short_intro_fails() {
        let eval = check("<p>Creatine works.</p><p>Long second paragraph with many many words.</p>");
        assert!(!eval.passed);
        assert_eq!(eval.detail, "First sentence has 2 words, need ≥6");
    }

    #[test]
    fn test_falls_back_to_body_text_without_paragraphs() {
        let eval = check("<div>Creatine improves short bursts of strength in most adults.</div>");
        assert!(eval.passed);
    }

    #[test]
    fn test_empty_body_fails() {
        let eval = check("");
        assert!(!eval.passed);
        assert_eq!(eval.measured, 0);
        assert!(eval.detail.contains("0 words"));
    }
}
