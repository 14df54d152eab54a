//! Text (terminal) reporter with colors and formatting

use crate::report::{ReportView, SortKey, SortSpec};
use crate::reporters::RenderOptions;
use crate::scoring::ScoreBand;
use anyhow::Result;

/// Band colors (ANSI escape codes)
fn band_color(band: ScoreBand) -> &'static str {
    match band {
        ScoreBand::Red => "\x1b[31m",
        ScoreBand::Orange => "\x1b[33m",
        ScoreBand::Green => "\x1b[32m",
    }
}

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Render view as formatted terminal output
pub fn render(view: &ReportView<'_>, options: &RenderOptions) -> Result<String> {
    let summary = view.summary();
    let mut out = String::new();

    // Header
    let avg_c = band_color(summary.average_band);
    out.push_str(&format!("\n{BOLD}GEO Audit{RESET}\n"));
    out.push_str(&format!(
        "{DIM}──────────────────────────────────────{RESET}\n"
    ));
    out.push_str(&format!(
        "Articles: {BOLD}{}{RESET}  Average: {avg_c}{BOLD}{:.1}/10{RESET}\n\n",
        summary.total_articles, summary.average_score
    ));

    if summary.total_articles == 0 {
        out.push_str(&format!("{DIM}No articles to report.{RESET}\n"));
        return Ok(out);
    }

    // Band distribution
    out.push_str(&format!("{BOLD}BANDS{RESET}\n "));
    for count in &summary.band_counts {
        let (min, max) = count.band.range();
        out.push_str(&format!(
            " {}{}{RESET} ({min}-{max}): {}",
            band_color(count.band),
            count.band,
            count.count
        ));
    }
    out.push_str("\n\n");

    // Pass rate per criterion
    out.push_str(&format!("{BOLD}CRITERIA{RESET}\n"));
    for stats in &summary.criteria {
        let rate = stats.passed as f64 / summary.total_articles as f64;
        let color = if rate >= 0.8 {
            "\x1b[32m"
        } else if rate >= 0.5 {
            "\x1b[33m"
        } else {
            "\x1b[31m"
        };
        out.push_str(&format!(
            "  {DIM}{:>2}{RESET}  {:<30} {color}{:>4}/{}{RESET}\n",
            stats.criterion_id, stats.name, stats.passed, summary.total_articles
        ));
    }
    out.push('\n');

    // Weakest articles
    if options.weakest > 0 {
        let weakest = view
            .sort_by(&[SortSpec::asc(SortKey::TotalScore), SortSpec::asc(SortKey::Title)])
            .paginate(options.weakest, 0);
        out.push_str(&format!("{BOLD}WEAKEST{RESET}\n"));
        for score in weakest.iter() {
            let title: String = score.title().chars().take(45).collect();
            let title = if score.title().chars().count() > 45 {
                format!("{}...", title)
            } else {
                title
            };
            out.push_str(&format!(
                "  {}{:>2}/10{RESET}  {:<48}  {DIM}{}{RESET}\n",
                band_color(score.band()),
                score.total_score(),
                title,
                score.url()
            ));
        }
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Report;
    use crate::reporters::tests::test_report;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn test_text_summary() {
        let report = test_report();
        let out = strip_ansi(&render(&report.view(), &RenderOptions::default()).expect("render"));
        assert!(out.contains("Articles: 3"));
        assert!(out.contains("Average: 5.3/10"));
        assert!(out.contains("red (0-4): 1"));
        assert!(out.contains("Sufficient length"));
    }

    #[test]
    fn test_weakest_first() {
        let report = test_report();
        let options = RenderOptions {
            weakest: 1,
            ..RenderOptions::default()
        };
        let out = strip_ansi(&render(&report.view(), &options).expect("render"));
        let weakest = out.split("WEAKEST").nth(1).expect("weakest section");
        assert!(weakest.contains("https://blog.example.com/empty"));
        assert!(!weakest.contains("https://blog.example.com/strong"));
    }

    #[test]
    fn test_empty_view() {
        let report = Report::default();
        let out = strip_ansi(&render(&report.view(), &RenderOptions::default()).expect("render"));
        assert!(out.contains("No articles to report."));
    }
}
