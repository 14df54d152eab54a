//! Scoring engine with parallel support
//!
//! The ScoringEngine runs the ten criteria against articles:
//! - Criteria for one article run in parallel and are re-ordered by id
//! - Articles are scored in parallel on a dedicated rayon pool
//! - Progress is reported through an optional callback
//!
//! ```text
//! Vec<Article> ──▶ pool.install(par_iter) ──▶ score(article) ──▶ Vec<ArticleScore>
//!                                              │
//!                                              └─ criteria.par_iter() ─▶ sort by id
//! ```

use crate::config::CriteriaConfig;
use crate::criteria::{default_criteria, Criterion};
use crate::models::{Article, ArticleScore, CriterionResult};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Progress callback: (article label, completed, total)
pub type ProgressCallback = Box<dyn Fn(&str, usize, usize) + Send + Sync>;

/// Scores articles against the fixed set of GEO criteria
pub struct ScoringEngine {
    criteria: Vec<Arc<dyn Criterion>>,
    /// Number of worker threads for `score_all`
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl ScoringEngine {
    /// Create an engine with the ten default criteria and auto-detected workers
    pub fn new(config: &CriteriaConfig) -> Self {
        Self {
            criteria: default_criteria(config),
            workers: resolve_workers(0),
            progress_callback: None,
        }
    }

    /// Set the number of worker threads (0 = auto-detect)
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = resolve_workers(workers);
        self
    }

    /// Set a progress callback
    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn criteria(&self) -> &[Arc<dyn Criterion>] {
        &self.criteria
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Score one article.
    ///
    /// Never fails: missing or malformed content fails individual criteria
    /// with an explanatory detail.
    pub fn score(&self, article: impl Into<Arc<Article>>) -> ArticleScore {
        let article = article.into();
        let mut results: Vec<CriterionResult> = self
            .criteria
            .par_iter()
            .map(|criterion| criterion.check(&article))
            .collect();
        results.sort_by_key(|r| r.criterion_id);

        let score = ArticleScore::new(article, results);
        debug!(
            "Scored {} -> {}/{}",
            score.url(),
            score.total_score(),
            crate::models::MAX_SCORE
        );
        score
    }

    /// Score many articles, preserving input order
    pub fn score_all(&self, articles: Vec<Article>) -> Vec<ArticleScore> {
        let start = Instant::now();
        let total = articles.len();
        info!(
            "Scoring {} articles against {} criteria on {} workers",
            total,
            self.criteria.len(),
            self.workers
        );

        let completed = AtomicUsize::new(0);
        let run = || -> Vec<ArticleScore> {
            articles
                .into_par_iter()
                .map(|article| {
                    let score = self.score(article);

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(ref callback) = self.progress_callback {
                        callback(score.title(), done, total);
                    }

                    score
                })
                .collect()
        };

        let scores = match rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()
        {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!("Failed to build worker pool ({}), using global pool", e);
                run()
            }
        };

        info!(
            "Scored {} articles in {:?}",
            scores.len(),
            start.elapsed()
        );
        scores
    }
}

fn resolve_workers(workers: usize) -> usize {
    if workers == 0 {
        std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(4)
            .min(16)
    } else {
        workers
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(&CriteriaConfig::default())
    }
}

/// Builder for ScoringEngine with fluent API
pub struct ScoringEngineBuilder {
    config: CriteriaConfig,
    workers: usize,
    progress_callback: Option<ProgressCallback>,
}

impl ScoringEngineBuilder {
    pub fn new() -> Self {
        Self {
            config: CriteriaConfig::default(),
            workers: 0,
            progress_callback: None,
        }
    }

    /// Criteria thresholds and strict mode
    pub fn config(mut self, config: CriteriaConfig) -> Self {
        self.config = config;
        self
    }

    /// Set number of worker threads
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set progress callback
    pub fn on_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn build(self) -> ScoringEngine {
        let mut engine = ScoringEngine::new(&self.config).with_workers(self.workers);
        if let Some(callback) = self.progress_callback {
            engine = engine.with_progress_callback(callback);
        }
        engine
    }
}

impl Default for ScoringEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
