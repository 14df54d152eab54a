//! WordPress REST API loader

use crate::config::{ConfigError, WordPressConfig};
use crate::ingest::{normalize_item, Fetch, IngestError, IngestOutcome, IngestProgress};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const POSTS_PATH: &str = "/wp-json/wp/v2/posts";
const MAX_PER_PAGE: usize = 100;

/// URL of one page of posts.
///
/// `base` is either a site root (the posts route is appended to its path)
/// or a REST endpoint whose path has a `wp-json` segment, used as is. Existing query parameters are kept; `per_page` and
/// `page` are always overwritten.
pub fn wp_page_url(base: &str, per_page: usize, page: usize) -> Result<Url, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidEndpoint {
        url: base.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = base.trim();
    if trimmed.is_empty() {
        return Err(invalid("empty endpoint"));
    }

    let mut url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("only http and https are supported"));
    }

    let is_rest_endpoint = url
        .path_segments()
        .is_some_and(|mut segments| segments.any(|s| s == "wp-json"));
    if !is_rest_endpoint {
        let path = format!("{}{POSTS_PATH}", url.path().trim_end_matches('/'));
        url.set_path(&path);
    }

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "per_page" && k != "page")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair("per_page", &per_page.to_string())
        .append_pair("page", &page.to_string());
    Ok(url)
}

/// Fetch posts page by page until an empty page, an error, or `max_pages`
pub fn load(
    fetcher: &dyn Fetch,
    endpoint: &str,
    config: &WordPressConfig,
    progress: Option<IngestProgress<'_>>,
) -> Result<IngestOutcome, IngestError> {
    let per_page = config.per_page.clamp(1, MAX_PER_PAGE);
    let max_pages = config.max_pages.max(1);
    let delay = Duration::from_millis(config.delay_ms);

    let mut outcome = IngestOutcome::default();
    for page in 1..=max_pages {
        if page > 1 && !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let url = wp_page_url(endpoint, per_page, page)?;
        if let Some(progress) = progress {
            progress(&format!("page {page}"));
        }

        let fetched = match fetcher.fetch(url.as_str()) {
            Ok(fetched) => fetched,
            // WordPress answers 400 for a page past the last one
            Err(IngestError::Status { status: 400, .. }) if page > 1 => {
                debug!("Page {} is past the last page", page);
                break;
            }
            Err(e) => {
                warn!("Stopping at page {}: {}", page, e);
                break;
            }
        };

        let posts = match serde_json::from_str::<Value>(&fetched.body) {
            Ok(Value::Array(posts)) => posts,
            Ok(_) => {
                warn!("Page {} is not a list of posts, stopping", page);
                break;
            }
            Err(e) => {
                warn!("Page {} is not valid JSON ({}), stopping", page, e);
                break;
            }
        };
        if posts.is_empty() {
            break;
        }

        debug!("Page {}: {} posts", page, posts.len());
        for (index, post) in posts.into_iter().enumerate() {
            match normalize_item(index, post) {
                Ok(article) => outcome.articles.push(article),
                Err(e) => outcome.skip(format!("page {page} item {index}"), &e),
            }
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::tests::MockFetcher;

    const JSON: &str = "application/json";

    fn config(max_pages: usize, per_page: usize) -> WordPressConfig {
        WordPressConfig {
            max_pages,
            per_page,
            delay_ms: 0,
        }
    }

    fn page_url(page: usize) -> String {
        format!("https://blog.example.com/wp-json/wp/v2/posts?per_page=2&page={page}")
    }

    fn post(n: usize) -> String {
        format!(
            r#"{{"link": "https://blog.example.com/p{n}", "title": {{"rendered": "Post {n}"}},
                "content": {{"rendered": "<p>Body {n}</p>"}}}}"#
        )
    }

    #[test]
    fn test_site_root_expands_to_posts_route() {
        let url = wp_page_url("https://blog.example.com/", 100, 3).expect("url");
        assert_eq!(
            url.as_str(),
            "https://blog.example.com/wp-json/wp/v2/posts?per_page=100&page=3"
        );
    }

    #[test]
    fn test_endpoint_keeps_other_query_params() {
        let url = wp_page_url(
            " https://x.example/wp-json/wp/v2/posts?status=publish&page=9 ",
            10,
            1,
        )
        .expect("url");
        assert_eq!(
            url.as_str(),
            "https://x.example/wp-json/wp/v2/posts?status=publish&per_page=10&page=1"
        );
    }

    #[test]
    fn test_wp_json_segment_is_detected() {
        let url = wp_page_url("https://x.example/wp-json", 10, 1).expect("url");
        assert_eq!(url.as_str(), "https://x.example/wp-json?per_page=10&page=1");

        let url = wp_page_url("https://x.example/blog/", 10, 2).expect("url");
        assert_eq!(
            url.as_str(),
            "https://x.example/blog/wp-json/wp/v2/posts?per_page=10&page=2"
        );

        let url = wp_page_url("https://x.example/my-wp-json-notes", 5, 1).expect("url");
        assert_eq!(
            url.as_str(),
            "https://x.example/my-wp-json-notes/wp-json/wp/v2/posts?per_page=5&page=1"
        );
    }

    #[test]
    fn test_invalid_endpoints() {
        for base in ["", "   ", "blog.example.com", "ftp://blog.example.com"] {
            assert!(
                matches!(wp_page_url(base, 1, 1), Err(ConfigError::InvalidEndpoint { .. })),
                "{base:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_pages_until_empty() {
        let fetcher = MockFetcher::default()
            .page(&page_url(1), JSON, &format!("[{},{}]", post(1), post(2)))
            .page(&page_url(2), JSON, &format!("[{}]", post(3)))
            .page(&page_url(3), JSON, "[]");
        let outcome = load(&fetcher, "https://blog.example.com", &config(50, 2), None)
            .expect("load");

        let titles: Vec<_> = outcome.articles.iter().map(|a| a.title()).collect();
        assert_eq!(titles, vec!["Post 1", "Post 2", "Post 3"]);
        assert_eq!(fetcher.requested().len(), 3);
    }

    #[test]
    fn test_respects_max_pages() {
        let fetcher = MockFetcher::default()
            .page(&page_url(1), JSON, &format!("[{}]", post(1)))
            .page(&page_url(2), JSON, &format!("[{}]", post(2)));
        let outcome =
            load(&fetcher, "https://blog.example.com", &config(1, 2), None).expect("load");
        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(fetcher.requested(), vec![page_url(1)]);
    }

    #[test]
    fn test_stops_on_error_and_bad_payload() {
        let fetcher = MockFetcher::default()
            .page(&page_url(1), JSON, &format!("[{}]", post(1)))
            .status(&page_url(2), 400);
        let outcome =
            load(&fetcher, "https://blog.example.com", &config(50, 2), None).expect("load");
        assert_eq!(outcome.articles.len(), 1);

        let fetcher = MockFetcher::default().page(&page_url(1), JSON, r#"{"code": "rest_error"}"#);
        let outcome =
            load(&fetcher, "https://blog.example.com", &config(50, 2), None).expect("load");
        assert!(outcome.articles.is_empty());
        assert_eq!(fetcher.requested().len(), 1);
    }

    #[test]
    fn test_first_page_failure_yields_nothing() {
        let fetcher = MockFetcher::default().status(&page_url(1), 500);
        let outcome =
            load(&fetcher, "https://blog.example.com", &config(50, 2), None).expect("load");
        assert!(outcome.articles.is_empty());
    }

    #[test]
    fn test_skips_posts_without_link() {
        let fetcher = MockFetcher::default()
            .page(
                &page_url(1),
                JSON,
                &format!(r#"[{}, {{"title": "orphan"}}, "junk"]"#, post(1)),
            )
            .page(&page_url(2), JSON, "[]");
        let outcome =
            load(&fetcher, "https://blog.example.com", &config(50, 2), None).expect("load");
        assert_eq!(outcome.articles.len(), 1);
        let origins: Vec<_> = outcome.skipped.iter().map(|s| s.origin.as_str()).collect();
        assert_eq!(origins, vec!["page 1 item 1", "page 1 item 2"]);
    }

    #[test]
    fn test_per_page_is_clamped() {
        let fetcher = MockFetcher::default();
        let _ = load(&fetcher, "https://blog.example.com", &config(1, 500), None);
        assert_eq!(
            fetcher.requested(),
            vec!["https://blog.example.com/wp-json/wp/v2/posts?per_page=100&page=1".to_string()]
        );
    }

    #[test]
    fn test_reports_progress() {
        let fetcher = MockFetcher::default().page(&page_url(1), JSON, "[]");
        let seen = std::sync::Mutex::new(Vec::new());
        let progress = |label: &str| seen.lock().expect("lock").push(label.to_string());
        load(&fetcher, "https://blog.example.com", &config(5, 2), Some(&progress)).expect("load");
        assert_eq!(*seen.lock().expect("lock"), vec!["page 1".to_string()]);
    }
}
