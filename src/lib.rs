//! geo-audit - GEO readiness audit for blog articles
//!
//! Loads articles from a JSON snapshot, a WordPress site or a list of URLs,
//! scores each one against ten structural criteria that make content easy
//! for generative answer engines to quote, and renders the results as CSV,
//! HTML, JSON or a terminal summary.
//!
//! ```no_run
//! use geo_audit::config::CriteriaConfig;
//! use geo_audit::models::Article;
//! use geo_audit::report::Report;
//! use geo_audit::scoring::ScoringEngine;
//!
//! let article = Article::new(
//!     "https://blog.example.com/creatine",
//!     "Creatine dosing",
//!     "<p>Creatine is a compound found in muscle.</p>",
//!     None,
//! );
//! let engine = ScoringEngine::new(&CriteriaConfig::default());
//! let report = Report::build(engine.score_all(vec![article]));
//! println!("{:.1}", report.summary().average_score);
//! ```

pub mod cli;
pub mod config;
pub mod criteria;
pub mod ingest;
pub mod models;
pub mod parsers;
pub mod report;
pub mod reporters;
pub mod scoring;
