//! URL list loader

use crate::ingest::{extract_page, Fetch, IngestError, IngestOutcome, IngestProgress};
use crate::models::Article;
use std::path::Path;
use tracing::debug;

/// URLs listed in `content`: one per line, blank lines and `#` comments ignored
fn parse_url_list(content: &str) -> Vec<&str> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Fetch every listed page and extract its article
pub fn load(
    fetcher: &dyn Fetch,
    path: &Path,
    progress: Option<IngestProgress<'_>>,
) -> Result<IngestOutcome, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let urls = parse_url_list(&content);
    debug!("{} URLs in {}", urls.len(), path.display());

    let mut outcome = IngestOutcome::default();
    for url in urls {
        if let Some(progress) = progress {
            progress(url);
        }
        match fetch_article(fetcher, url) {
            Ok(article) => outcome.articles.push(article),
            Err(e) => outcome.skip(url, &e),
        }
    }
    Ok(outcome)
}

fn fetch_article(fetcher: &dyn Fetch, url: &str) -> Result<Article, IngestError> {
    let page = fetcher.fetch(url)?;
    if !page.is_html() {
        return Err(IngestError::NotHtml {
            url: url.to_string(),
            content_type: page.content_type.unwrap_or_default(),
        });
    }
    Ok(extract_page(url, &page.body))
}
