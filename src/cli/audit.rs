//! Audit command - ingest, score, report

use crate::config::{load_config, AuditConfig};
use crate::ingest::{ingest, SourceKind, SourceSpec};
use crate::report::filters::{by_band, matches_query};
use crate::report::{Report, SortDirection, SortKey, SortSpec};
use crate::reporters::{render, OutputFormat, RenderOptions};
use crate::scoring::{ScoreBand, ScoringEngineBuilder};
use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::warn;

/// Resolved options of one `audit` invocation
#[derive(Debug, Clone)]
pub struct AuditArgs {
    pub source: SourceKind,
    pub input: Option<String>,
    pub config_path: Option<PathBuf>,
    pub workers: Option<usize>,
    pub csv_path: PathBuf,
    pub html_path: Option<PathBuf>,
    pub json_path: Option<PathBuf>,
    pub page_size: Option<usize>,
    pub strict: bool,
    pub wp_max_pages: Option<usize>,
    pub wp_per_page: Option<usize>,
    pub wp_delay_ms: Option<u64>,
    pub sort: SortKey,
    pub direction: SortDirection,
    pub band: Option<ScoreBand>,
    pub search: Option<String>,
    pub quiet: bool,
}

impl AuditArgs {
    /// CLI flags win over file values
    fn apply_overrides(&self, config: &mut AuditConfig) {
        if self.strict {
            config.criteria.strict = true;
        }
        if let Some(page_size) = self.page_size {
            config.output.page_size = page_size;
        }
        if let Some(max_pages) = self.wp_max_pages {
            config.wordpress.max_pages = max_pages;
        }
        if let Some(per_page) = self.wp_per_page {
            config.wordpress.per_page = per_page;
        }
        if let Some(delay_ms) = self.wp_delay_ms {
            config.wordpress.delay_ms = delay_ms;
        }
    }

    /// Requested order, ties broken by title then url
    fn sort_specs(&self) -> Vec<SortSpec> {
        let mut specs = vec![SortSpec {
            key: self.sort,
            direction: self.direction,
        }];
        for key in [SortKey::Title, SortKey::Url] {
            if key != self.sort {
                specs.push(SortSpec::asc(key));
            }
        }
        specs
    }
}

fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn create_bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░")
}

/// Write a report file, creating parent directories as needed
fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(())
}

/// Run the audit command
pub fn run(args: AuditArgs) -> Result<()> {
    let start = Instant::now();

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = load_config(&cwd, args.config_path.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let spec = SourceSpec::new(args.source, args.input.as_deref())?;

    // Ingestion
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(create_spinner_style());
    spinner.set_message(format!("Loading {} source {}...", spec.kind(), spec.input()));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let on_item = |label: &str| spinner.set_message(format!("Fetching {label}"));
    let outcome = ingest(&spec, &config, Some(&on_item))
        .with_context(|| format!("Failed to load articles from {}", spec.input()))?;
    let (ingested, skipped) = (outcome.articles.len(), outcome.skipped.len());
    spinner.finish_with_message(format!(
        "{}Loaded {} articles ({} skipped)",
        style("✓ ").green(),
        ingested,
        skipped
    ));

    if ingested == 0 {
        warn!("No articles loaded from {}; reports will be empty", spec.input());
    }

    // Scoring
    let bar = ProgressBar::new(ingested as u64);
    bar.set_style(create_bar_style());
    let bar_handle = bar.clone();
    let engine = ScoringEngineBuilder::new()
        .config(config.criteria.clone())
        .workers(args.workers.unwrap_or(0))
        .on_progress(Box::new(move |title, done, _total| {
            bar_handle.set_position(done as u64);
            bar_handle.set_message(title.chars().take(40).collect::<String>());
        }))
        .build();
    let scores = engine.score_all(outcome.articles);
    bar.finish_and_clear();

    // View
    let report = Report::build(scores);
    let mut view = report.view();
    if let Some(band) = args.band {
        view = view.filter(by_band(band));
    }
    if let Some(query) = args.search.as_deref() {
        view = view.filter(matches_query(query));
    }
    let view = view.sort_by(&args.sort_specs());

    let options = RenderOptions {
        page_size: config.output.page_size,
        ..RenderOptions::default()
    };

    // Outputs
    let outputs = [
        (OutputFormat::Csv, Some(&args.csv_path)),
        (OutputFormat::Html, args.html_path.as_ref()),
        (OutputFormat::Json, args.json_path.as_ref()),
    ];
    for (format, path) in outputs {
        let Some(path) = path else { continue };
        let content = render(&view, format, &options)
            .with_context(|| format!("Failed to render {} report", format))?;
        write_report(path, &content)?;
        println!(
            "{}{} report written: {}",
            style("✓ ").green(),
            format.to_string().to_uppercase(),
            style(path.display()).cyan()
        );
    }

    if !args.quiet {
        print!("{}", render(&view, OutputFormat::Text, &options)?);
    }

    println!(
        "Ingested {}, skipped {}, reported {} {}",
        style(ingested).bold(),
        style(skipped).bold(),
        view.len(),
        style(format!("({:.2}s)", start.elapsed().as_secs_f64())).dim()
    );

    Ok(())
}
