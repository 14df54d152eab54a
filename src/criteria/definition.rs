//! Definition of the main term
//!
//! Looks for a "term + copula" sentence such as "Creatine is a compound..."
//! or "Kreatín je látka...". Pronoun-like subjects are ignored.

use crate::criteria::base::{Criterion, Evaluation};
use crate::models::Article;
use regex::Regex;
use std::sync::OnceLock;

/// Subjects that never name a term
const GENERIC_SUBJECTS: &[&str] = &[
    "this", "that", "there", "what", "which", "here", "these", "those", "who", "where", "when",
    "toto", "tieto", "tento", "táto", "tato", "to", "ten", "tá", "ta", "čo", "co", "kto",
    "ktorý", "ktory", "ktorá", "ktora", "ktoré", "ktore", "preto", "teda", "tam", "tu",
];

fn definition_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?P<term>\p{L}[\p{L}-]{2,})\s+(?:(?:is|are)\s+(?:a|an|the|one|defined\s+as|known\s+as)|refers\s+to|means|je|sú|znamená|predstavuje|označuje)\b",
        )
        .expect("valid regex")
    })
}

pub struct DefinitionCriterion {
    strict: bool,
}

impl DefinitionCriterion {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    /// Defined terms found in `text`, lowercased, in order
    fn defined_terms(text: &str) -> Vec<String> {
        definition_regex()
            .captures_iter(text)
            .filter_map(|caps| caps.name("term"))
            .map(|m| m.as_str().to_lowercase())
            .filter(|term| !GENERIC_SUBJECTS.contains(&term.as_str()))
            .collect()
    }
}

/// Lowercased whole words of a title; hyphenated words stay joined
fn title_words(title: &str) -> Vec<String> {
    title
        .split(|c: char| !(c.is_alphanumeric() || c == '-'))
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

impl Criterion for DefinitionCriterion {
    fn id(&self) -> u8 {
        2
    }

    fn key(&self) -> &'static str {
        "definition"
    }

    fn name(&self) -> &'static str {
        "Definition of the main term"
    }

    fn description(&self) -> &'static str {
        "Body contains a sentence that defines a term (\"X is a ...\", \"X je ...\")"
    }

    fn recommendation(&self) -> &'static str {
        "Add a one-sentence definition of the main term (\"X is ...\")."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let terms = Self::defined_terms(article.body_text());
        if terms.is_empty() {
            return Evaluation::fail("0 definition sentences found", 0);
        }

        if self.strict {
            let title = title_words(article.title());
            let in_title: Vec<&String> = terms.iter().filter(|t| title.contains(*t)).collect();
            return match in_title.first() {
                Some(term) => Evaluation::pass(
                    format!("Defines \"{term}\", which appears in the title"),
                    in_title.len(),
                ),
                None => Evaluation::fail(
                    format!(
                        "{} definition(s) found, none of a title term (strict)",
                        terms.len()
                    ),
                    0,
                ),
            };
        }

        Evaluation::pass(
            format!("Defines \"{}\" ({} definition(s) found)", terms[0], terms.len()),
            terms.len(),
        )
    }
}
