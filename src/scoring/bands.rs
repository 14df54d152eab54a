//! Score bands
//!
//! A single threshold table classifies both per-article totals and
//! fractional averages. Every consumer (terminal, CSV, HTML, JSON, report
//! filters) goes through [`ScoreBand::from_score`] or
//! [`ScoreBand::from_average`].

use crate::models::ArticleScore;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Traffic-light classification of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Red,
    Orange,
    Green,
}

/// Lower bound of one band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BandThreshold {
    pub band: ScoreBand,
    /// Smallest total score in this band
    pub min_score: u8,
}

/// Band thresholds in ascending order: 0-4 red, 5-7 orange, 8-10 green
pub const SCORE_BANDS: [BandThreshold; 3] = [
    BandThreshold {
        band: ScoreBand::Red,
        min_score: 0,
    },
    BandThreshold {
        band: ScoreBand::Orange,
        min_score: 5,
    },
    BandThreshold {
        band: ScoreBand::Green,
        min_score: 8,
    },
];

impl ScoreBand {
    pub const ALL: [ScoreBand; 3] = [ScoreBand::Red, ScoreBand::Orange, ScoreBand::Green];

    /// Band of an integer total score
    pub fn from_score(score: u8) -> Self {
        Self::from_average(f64::from(score))
    }

    /// Band of a fractional score such as a corpus average
    pub fn from_average(score: f64) -> Self {
        SCORE_BANDS
            .iter()
            .rev()
            .find(|t| score >= f64::from(t.min_score))
            .map(|t| t.band)
            .unwrap_or(ScoreBand::Red)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Red => "red",
            ScoreBand::Orange => "orange",
            ScoreBand::Green => "green",
        }
    }

    /// CSS class used for rows and badges in the HTML report
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Red => "band-red",
            ScoreBand::Orange => "band-orange",
            ScoreBand::Green => "band-green",
        }
    }

    /// Inclusive total-score range of this band
    pub fn range(&self) -> (u8, u8) {
        let idx = SCORE_BANDS
            .iter()
            .position(|t| t.band == *self)
            .unwrap_or(0);
        let min = SCORE_BANDS[idx].min_score;
        let max = SCORE_BANDS
            .get(idx + 1)
            .map(|next| next.min_score - 1)
            .unwrap_or(crate::models::MAX_SCORE);
        (min, max)
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoreBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "red" => Ok(ScoreBand::Red),
            "orange" => Ok(ScoreBand::Orange),
            "green" => Ok(ScoreBand::Green),
            _ => Err(format!(
                "Unknown band '{}'. Valid: red, orange, green",
                s
            )),
        }
    }
}

/// Band of a scored article
pub fn band_of(score: &ArticleScore) -> ScoreBand {
    ScoreBand::from_score(score.total_score())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreBand::from_score(0), ScoreBand::Red);
        assert_eq!(ScoreBand::from_score(4), ScoreBand::Red);
        assert_eq!(ScoreBand::from_score(5), ScoreBand::Orange);
        assert_eq!(ScoreBand::from_score(7), ScoreBand::Orange);
        assert_eq!(ScoreBand::from_score(8), ScoreBand::Green);
        assert_eq!(ScoreBand::from_score(10), ScoreBand::Green);
    }

    #[test]
    fn test_average_bands() {
        assert_eq!(ScoreBand::from_average(4.99), ScoreBand::Red);
        assert_eq!(ScoreBand::from_average(5.0), ScoreBand::Orange);
        assert_eq!(ScoreBand::from_average(7.9), ScoreBand::Orange);
        assert_eq!(ScoreBand::from_average(8.0), ScoreBand::Green);
        assert_eq!(ScoreBand::from_average(f64::NAN), ScoreBand::Red);
    }

    #[test]
    fn test_ranges_cover_all_scores() {
        assert_eq!(ScoreBand::Red.range(), (0, 4));
        assert_eq!(ScoreBand::Orange.range(), (5, 7));
        assert_eq!(ScoreBand::Green.range(), (8, 10));
    }

    #[test]
    fn test_parse_band() {
        assert_eq!("GREEN".parse::<ScoreBand>(), Ok(ScoreBand::Green));
        assert!("blue".parse::<ScoreBand>().is_err());
    }

    #[test]
    fn test_band_of_score() {
        let score = crate::models::tests::score_with("t", "https://example.com", 6);
        assert_eq!(band_of(&score), ScoreBand::Orange);
        assert_eq!(score.band(), ScoreBand::Orange);
    }
}
