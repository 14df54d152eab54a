//! Article scoring
//!
//! Every article is scored against the ten GEO criteria:
//!
//! ```text
//! Total Score = number of passed criteria (0-10)
//!
//! Band:
//!   red     0-4
//!   orange  5-7
//!   green   8-10
//! ```
//!
//! The band table is also used for fractional averages (average < 5 is
//! red, < 8 orange, otherwise green).

mod bands;
mod engine;

pub use bands::{band_of, BandThreshold, ScoreBand, SCORE_BANDS};
pub use engine::{ProgressCallback, ScoringEngine, ScoringEngineBuilder};

#[cfg(test)]
pub(crate) use engine::tests::scenario_article;
