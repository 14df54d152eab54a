//! Integration tests for the geo-audit library
//!
//! These tests run the full pipeline through the public API:
//! - JSON snapshot ingestion with skipped items
//! - Scoring and band classification
//! - Report views (filter, sort, paginate) and every output format

use geo_audit::config::{AuditConfig, CriteriaConfig};
use geo_audit::ingest::{ingest, SourceKind, SourceSpec};
use geo_audit::models::Article;
use geo_audit::report::filters::by_band;
use geo_audit::report::{Report, SortKey, SortSpec};
use geo_audit::reporters::{render, OutputFormat, RenderOptions};
use geo_audit::scoring::{band_of, ScoreBand, ScoringEngine};
use std::path::PathBuf;

/// Path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture_report() -> Report {
    let path = fixtures_path().join("articles.json");
    let spec = SourceSpec::new(SourceKind::Json, path.to_str()).expect("valid source");
    let outcome = ingest(&spec, &AuditConfig::default(), None).expect("ingest fixture");
    assert_eq!(outcome.skipped.len(), 1, "draft without url is skipped");

    let engine = ScoringEngine::new(&CriteriaConfig::default()).with_workers(2);
    Report::build(engine.score_all(outcome.articles))
}

/// An article passing all ten criteria
fn strong_article() -> Article {
    Article::new(
        "https://blog.example.com/strong",
        "Creatine dosage",
        format!(
            "<p>Creatine is a compound that supports 3 g daily strength gains in adults.</p>\
             <h2>Dosage</h2><ul><li>3 g</li><li>5 g</li></ul>\
             <h2>Forms</h2><table><tr><td>Mono</td><td>5 g</td></tr></table>\
             <p>See <a href=\"https://pubmed.example.org/1\">this review</a>.</p>\
             <h2>FAQ</h2><h3>Is it safe?</h3><p>Yes.</p><p>{}</p>",
            vec!["word"; 500].join(" ")
        ),
        Some("d".repeat(150)),
    )
}

// ============================================================================
// Ingestion + scoring
// ============================================================================

#[test]
fn test_fixture_keeps_ingestion_order() {
    let report = fixture_report();
    let urls: Vec<_> = report.entries().iter().map(|s| s.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://blog.example.com/creatine",
            "https://blog.example.com/protein",
            "https://blog.example.com/empty",
        ]
    );
    assert_eq!(report.entries()[1].title(), "Protein & recovery");
    assert_eq!(report.entries()[2].title(), "(no title)");
}

#[test]
fn test_scores_are_consistent() {
    let report = fixture_report();
    for score in report.entries() {
        let passed = score.criteria().iter().filter(|c| c.passed).count();
        assert_eq!(usize::from(score.total_score()), passed);
        assert_eq!(band_of(score), ScoreBand::from_score(score.total_score()));
        let ids: Vec<u8> = score.criteria().iter().map(|c| c.criterion_id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u8>>());
    }
}

#[test]
fn test_empty_article_scores_zero_with_details() {
    let report = fixture_report();
    let empty = &report.entries()[2];
    assert_eq!(empty.total_score(), 0);
    assert_eq!(empty.band(), ScoreBand::Red);
    assert!(empty.criteria().iter().all(|c| !c.detail.is_empty()));
}

#[test]
fn test_structured_article_outscores_bare_question() {
    let report = fixture_report();
    let creatine = &report.entries()[0];
    let protein = &report.entries()[1];
    assert!(creatine.total_score() > protein.total_score());
    assert!(creatine.criterion_by_key("citations").is_some_and(|c| c.passed));
    assert!(!creatine
        .criterion_by_key("meta_description")
        .is_some_and(|c| c.passed));
}

#[test]
fn test_strong_article_is_green() {
    let score = ScoringEngine::default().score(strong_article());
    assert_eq!(score.total_score(), 10, "{:#?}", score.criteria());
    assert_eq!(score.band(), ScoreBand::Green);
    assert!(score.recommendations().is_empty());
}

#[test]
fn test_source_specs_validate_inputs() {
    let urls = fixtures_path().join("urls.txt");
    let spec = SourceSpec::new(SourceKind::Urls, urls.to_str()).expect("url list exists");
    assert_eq!(spec.kind(), SourceKind::Urls);

    let missing = fixtures_path().join("missing.txt");
    assert!(SourceSpec::new(SourceKind::Urls, missing.to_str()).is_err());
    assert!(SourceSpec::new(SourceKind::Wp, Some("ftp://blog.example.com")).is_err());
    assert!(SourceSpec::new(SourceKind::Wp, Some("https://blog.example.com/")).is_ok());
}

// ============================================================================
// Report views
// ============================================================================

#[test]
fn test_sort_with_secondary_key_is_stable() {
    let engine = ScoringEngine::default();
    let report = Report::build(engine.score_all(vec![
        Article::new("https://b.example/2", "Beta", "", None),
        Article::new("https://b.example/1", "alpha", "", None),
        strong_article(),
        Article::new("https://b.example/3", "Alpha", "", None),
    ]));

    let view = report.sort_by(&[SortSpec::desc(SortKey::TotalScore), SortSpec::asc(SortKey::Title)]);
    let urls: Vec<_> = view.iter().map(|s| s.url()).collect();
    assert_eq!(
        urls,
        vec![
            "https://blog.example.com/strong",
            // "alpha" and "Alpha" tie case-insensitively: ingestion order kept
            "https://b.example/1",
            "https://b.example/3",
            "https://b.example/2",
        ]
    );
}

#[test]
fn test_pagination_covers_every_entry_once() {
    let engine = ScoringEngine::default();
    let articles: Vec<Article> = (0..7)
        .map(|i| Article::new(format!("https://p.example/{i}"), format!("Post {i}"), "", None))
        .collect();
    let report = Report::build(engine.score_all(articles));
    let view = report.view();

    assert_eq!(view.page_count(3), 3);
    let mut seen = Vec::new();
    for page in 0..view.page_count(3) {
        seen.extend(view.paginate(3, page).iter().map(|s| s.url().to_string()));
    }
    let expected: Vec<String> = (0..7).map(|i| format!("https://p.example/{i}")).collect();
    assert_eq!(seen, expected);
    assert!(view.paginate(3, 3).is_empty());
}

#[test]
fn test_band_filter_and_summary() {
    let report = fixture_report();
    let red = report.filter(by_band(ScoreBand::Red));
    assert!(red.iter().all(|s| s.band() == ScoreBand::Red));
    assert_eq!(
        red.summary().band_count(ScoreBand::Red),
        report.summary().band_count(ScoreBand::Red)
    );
    assert_eq!(report.summary().total_articles, 3);
}

// ============================================================================
// Outputs
// ============================================================================

#[test]
fn test_csv_rows_follow_view_order() {
    let report = fixture_report();
    let view = report.sort_by(&[SortSpec::desc(SortKey::TotalScore), SortSpec::asc(SortKey::Title)]);
    let csv = render(&view, OutputFormat::Csv, &RenderOptions::default()).expect("csv");

    assert!(csv.starts_with('\u{feff}'));
    let lines: Vec<_> = csv.trim_start_matches('\u{feff}').lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("url,title,total_score,band,direct_answer,direct_answer_detail"));
    assert!(lines[1].starts_with("https://blog.example.com/creatine,"));
}

#[test]
fn test_json_and_html_outputs() {
    let report = fixture_report();
    let view = report.view();
    let options = RenderOptions::default();

    let json = render(&view, OutputFormat::Json, &options).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["summary"]["total_articles"], 3);
    assert_eq!(parsed["articles"][2]["band"], "red");

    let html = render(&view, OutputFormat::Html, &options).expect("html");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Protein &amp; recovery"));
    assert!(html.contains("report-data"));
}

#[test]
fn test_empty_report_renders_headers_only() {
    let report = Report::build(Vec::new());
    let csv = render(&report.view(), OutputFormat::Csv, &RenderOptions::default()).expect("csv");
    assert_eq!(csv.trim_start_matches('\u{feff}').lines().count(), 1);

    let json = render(&report.view(), OutputFormat::Json, &RenderOptions::default()).expect("json");
    let parsed: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    assert_eq!(parsed["articles"].as_array().map(Vec::len), Some(0));
}
