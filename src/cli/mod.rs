//! CLI command definitions and handlers

mod audit;
mod init;

use crate::ingest::SourceKind;
use crate::report::{SortDirection, SortKey};
use crate::scoring::ScoreBand;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use audit::AuditArgs;

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// Parse a non-negative number of seconds
fn parse_seconds(s: &str) -> Result<f64, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number of seconds", s))?;
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err("seconds must be zero or positive".to_string())
    }
}

/// geo-audit - GEO readiness audit for blog articles
#[derive(Parser, Debug)]
#[command(name = "geo-audit")]
#[command(
    version,
    about = "Audit blog articles for generative-engine readiness: 10 structural criteria, CSV/HTML/JSON reports",
    after_help = "\
Examples:
  geo-audit audit --source json --input articles.json
  geo-audit audit --source wp --input https://blog.example.com --html output/report.html
  geo-audit audit --source urls --input urls.txt --strict --band red
  geo-audit init                              Write a commented geo-audit.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long, global = true, value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: Option<String>,

    /// Number of parallel scoring workers (1-64, default: all cores)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    /// Config file (default: ./geo-audit.toml, then ~/.config/geo-audit/config.toml)
    #[arg(long, global = true, env = "GEO_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load articles, score them and write reports
    #[command(after_help = "\
Examples:
  geo-audit audit -s json -i articles.json                     CSV to output/report.csv
  geo-audit audit -s json -i articles.json --json out/r.json   Also write JSON
  geo-audit audit -s wp -i https://blog.example.com --wp-max-pages 5
  geo-audit audit -s urls -i urls.txt --sort title --order asc
  geo-audit audit -s json -i articles.json --search creatine --band orange")]
    Audit {
        /// Input source type
        #[arg(long, short = 's', value_enum)]
        source: SourceKind,

        /// JSON/URL list file, or WordPress site/endpoint URL
        #[arg(long, short = 'i')]
        input: Option<String>,

        /// CSV report path
        #[arg(long, short = 'o', default_value = "output/report.csv")]
        output: PathBuf,

        /// Optional HTML report path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Optional JSON report path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Initial HTML page size (default: 10)
        #[arg(long)]
        page_size: Option<usize>,

        /// Stricter heuristics for definitions, facts and citations
        #[arg(long)]
        strict: bool,

        /// Max WordPress pages to fetch (default: 50)
        #[arg(long)]
        wp_max_pages: Option<usize>,

        /// WordPress posts per page, 1-100 (default: 100)
        #[arg(long)]
        wp_per_page: Option<usize>,

        /// Pause between WordPress page requests, in seconds (default: 0.2)
        #[arg(long, value_parser = parse_seconds)]
        wp_sleep: Option<f64>,

        /// Report order: score, title, url
        #[arg(long, default_value = "score")]
        sort: SortKey,

        /// asc or desc (default: desc for score, asc otherwise)
        #[arg(long)]
        order: Option<SortDirection>,

        /// Only report articles in this band (red, orange, green)
        #[arg(long)]
        band: Option<ScoreBand>,

        /// Only report articles matching every search term
        #[arg(long)]
        search: Option<String>,

        /// Skip the terminal summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Write a geo-audit.toml with the default settings
    Init {
        /// Directory to write into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the CLI
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),

        Commands::Audit {
            source,
            input,
            output,
            html,
            json,
            page_size,
            strict,
            wp_max_pages,
            wp_per_page,
            wp_sleep,
            sort,
            order,
            band,
            search,
            quiet,
        } => {
            let direction = order.unwrap_or(match sort {
                SortKey::TotalScore => SortDirection::Descending,
                SortKey::Title | SortKey::Url => SortDirection::Ascending,
            });

            audit::run(AuditArgs {
                source,
                input,
                config_path: cli.config,
                workers: cli.workers,
                csv_path: output,
                html_path: html,
                json_path: json,
                page_size,
                strict,
                wp_max_pages,
                wp_per_page,
                wp_delay_ms: wp_sleep.map(|secs| (secs * 1000.0).round() as u64),
                sort,
                direction,
                band,
                search,
                quiet,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workers() {
        assert_eq!(parse_workers("4"), Ok(4));
        assert!(parse_workers("0").is_err());
        assert!(parse_workers("65").is_err());
        assert!(parse_workers("x").is_err());
    }

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("0.2"), Ok(0.2));
        assert_eq!(parse_seconds("0"), Ok(0.0));
        assert!(parse_seconds("-1").is_err());
        assert!(parse_seconds("NaN").is_err());
    }

    #[test]
    fn test_audit_args() {
        let cli = Cli::try_parse_from([
            "geo-audit",
            "audit",
            "--source",
            "wp",
            "--input",
            "https://blog.example.com",
            "--sort",
            "title",
            "--band",
            "green",
            "--workers",
            "2",
        ])
        .expect("parse");
        assert_eq!(cli.workers, Some(2));
        match cli.command {
            Commands::Audit {
                source,
                input,
                output,
                sort,
                order,
                band,
                ..
            } => {
                assert_eq!(source, SourceKind::Wp);
                assert_eq!(input.as_deref(), Some("https://blog.example.com"));
                assert_eq!(output, PathBuf::from("output/report.csv"));
                assert_eq!(sort, SortKey::Title);
                assert_eq!(order, None);
                assert_eq!(band, Some(ScoreBand::Green));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_rejects_unknown_source() {
        assert!(Cli::try_parse_from(["geo-audit", "audit", "--source", "rss"]).is_err());
        assert!(Cli::try_parse_from(["geo-audit", "audit", "-s", "json", "--sort", "date"]).is_err());
    }
}
