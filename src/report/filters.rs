//! Reusable predicates for [`Report::filter`](super::Report::filter)

use crate::models::ArticleScore;
use crate::scoring::ScoreBand;

/// Entries in `band`
pub fn by_band(band: ScoreBand) -> impl Fn(&ArticleScore) -> bool {
    move |score| score.band() == band
}

/// Entries whose title contains `needle`, case-insensitively
pub fn title_contains(needle: &str) -> impl Fn(&ArticleScore) -> bool {
    let needle = needle.to_lowercase();
    move |score| score.title().to_lowercase().contains(&needle)
}

/// Entries with a total score of at least `min`
pub fn min_score(min: u8) -> impl Fn(&ArticleScore) -> bool {
    move |score| score.total_score() >= min
}

/// Lowercased text a free-text query is matched against: title, URL,
/// band and the details of every criterion
pub fn search_haystack(score: &ArticleScore) -> String {
    let mut haystack = format!(
        "{} {} {} {}",
        score.title(),
        score.url(),
        score.total_score(),
        score.band()
    );
    for criterion in score.criteria() {
        haystack.push(' ');
        haystack.push_str(&criterion.detail);
    }
    haystack.to_lowercase()
}

/// Entries whose haystack contains every whitespace-separated term of `query`
pub fn matches_query(query: &str) -> impl Fn(&ArticleScore) -> bool {
    let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
    move |score| {
        if terms.is_empty() {
            return true;
        }
        let haystack = search_haystack(score);
        terms.iter().all(|t| haystack.contains(t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::score_with;

    #[test]
    fn test_by_band() {
        let red = score_with("a", "https://example.com/a", 2);
        let green = score_with("b", "https://example.com/b", 9);
        let keep = by_band(ScoreBand::Green);
        assert!(!keep(&red));
        assert!(keep(&green));
    }

    #[test]
    fn test_title_contains_ignores_case() {
        let score = score_with("Creatine Guide", "https://example.com/a", 2);
        assert!(title_contains("creatine")(&score));
        assert!(!title_contains("protein")(&score));
    }

    #[test]
    fn test_matches_query_all_terms() {
        let score = score_with("Creatine Guide", "https://example.com/kreatin", 2);
        assert!(matches_query("guide KREATIN")(&score));
        assert!(matches_query("red")(&score));
        assert!(!matches_query("guide protein")(&score));
        assert!(matches_query("   ")(&score));
    }

    #[test]
    fn test_min_score() {
        let score = score_with("a", "https://example.com/a", 5);
        assert!(min_score(5)(&score));
        assert!(!min_score(6)(&score));
    }
}
