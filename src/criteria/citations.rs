//! Sources and citations
//!
//! Passes on a link to another host, or on an explicit source marker
//! ("Sources:", "Zdroje:", a "References" heading). Strict mode accepts
//! only the external link.

use crate::criteria::base::{plural, Criterion, Evaluation};
use crate::models::{normalize_host, Article};
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

const SOURCE_HEADINGS: &[&str] = &[
    "source",
    "sources",
    "references",
    "bibliography",
    "zdroj",
    "zdroje",
    "referencie",
    "literatúra",
    "literatura",
];

fn source_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(?:source|sources|zdroj|zdroje|references|referencie|literatúra|literatura)\s*:",
        )
        .expect("valid regex")
    })
}

pub struct CitationsCriterion {
    strict: bool,
}

impl CitationsCriterion {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }
}

/// Number of links pointing to a host other than the article's own.
///
/// Relative links resolve against the article URL and therefore never
/// count. When the article URL does not parse, every absolute http(s)
/// link counts as external.
fn count_external_links(article: &Article) -> usize {
    let base = Url::parse(article.url().trim()).ok();
    let own_host = base
        .as_ref()
        .and_then(|u| u.host_str())
        .map(normalize_host);

    article
        .outline()
        .links
        .iter()
        .filter_map(|href| match &base {
            Some(base) => base.join(href).ok(),
            None => Url::parse(href).ok(),
        })
        .filter(|link| matches!(link.scheme(), "http" | "https"))
        .filter_map(|link| link.host_str().map(normalize_host))
        .filter(|host| own_host.as_deref() != Some(host.as_str()))
        .count()
}

fn has_source_marker(article: &Article) -> bool {
    if source_marker_regex().is_match(article.body_text()) {
        return true;
    }
    article.outline().headings().any(|(_, text)| {
        let text = text.trim().trim_end_matches(':').to_lowercase();
        SOURCE_HEADINGS.contains(&text.as_str())
    })
}

impl Criterion for CitationsCriterion {
    fn id(&self) -> u8 {
        5
    }

    fn key(&self) -> &'static str {
        "citations"
    }

    fn name(&self) -> &'static str {
        "Sources and citations"
    }

    fn description(&self) -> &'static str {
        "Links to an external source or an explicit sources section"
    }

    fn recommendation(&self) -> &'static str {
        "Cite sources: link to studies or authoritative sites, or add a \"Sources\" section."
    }

    fn evaluate(&self, article: &Article) -> Evaluation {
        let external = count_external_links(article);
        if external > 0 {
            return Evaluation::pass(plural(external, "external link"), external);
        }

        if self.strict {
            return Evaluation::fail("0 external links, need ≥1 (strict)", 0);
        }

        if has_source_marker(article) {
            return Evaluation::pass("0 external links, explicit source marker found", 0);
        }

        Evaluation::fail("0 external links and no source marker", 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::tests::article_with_body;

    #[test]
    fn test_external_link_passes() {
        let article = article_with_body(
            r#"<p>See <a href="https://pubmed.ncbi.nlm.nih.gov/1">this study</a>.</p>"#,
        );
        let eval = CitationsCriterion::new(false).evaluate(&article);
        assert!(eval.passed);
        assert_eq!(eval.detail, "1 external link");
    }

    #[test]
    fn test_internal_links_do_not_count() {
        let article = article_with_body(
            r##"<p><a href="/other-post">a</a> <a href="https://www.blog.example.com/x">b</a>
            <a href="mailto:me@example.org">c</a> <a href="#top">d</a></p>"##,
        );
        let eval = CitationsCriterion::new(false).evaluate(&article);
        assert!(!eval.passed);
        assert_eq!(eval.detail, "0 external links and no source marker");
    }

    #[test]
    fn test_protocol_relative_link_is_external() {
        let article = article_with_body(r#"<a href="//cdn.other.org/paper.pdf">paper</a>"#);
        assert_eq!(count_external_links(&article), 1);
    }

    #[test]
    fn test_unparseable_article_url_counts_absolute_links() {
        let article = Article::new(
            "not a url",
            "t",
            r#"<a href="https://example.org">x</a><a href="/rel">y</a>"#,
            None,
        );
        assert_eq!(count_external_links(&article), 1);
    }

    #[test]
    fn test_source_marker_in_text() {
        let article = article_with_body("<p>Zdroj: Ministerstvo zdravotníctva, 2023.</p>");
        let eval = CitationsCriterion::new(false).evaluate(&article);
        assert!(eval.passed);
        assert!(eval.detail.contains("source marker"));
    }

    #[test]
    fn test_sources_heading() {
        let article = article_with_body("<h2>References</h2><p>Smith et al.</p>");
        assert!(CitationsCriterion::new(false).evaluate(&article).passed);
    }

    #[test]
    fn test_strict_ignores_marker() {
        let article = article_with_body("<p>Sources: our own notes.</p>");
        let eval = CitationsCriterion::new(true).evaluate(&article);
        assert!(!eval.passed);
        assert!(eval.detail.contains("strict"));
    }
}
