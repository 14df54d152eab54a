//! Blocking HTTP access for the network adapters

use crate::config::HttpConfig;
use crate::ingest::IngestError;
use std::time::Duration;
use tracing::debug;

/// A successfully fetched resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub content_type: Option<String>,
    /// Body decoded as UTF-8, invalid sequences replaced
    pub body: String,
}

impl FetchedPage {
    /// Whether the content type (if any) allows treating the body as HTML
    pub fn is_html(&self) -> bool {
        match &self.content_type {
            Some(ct) => {
                let ct = ct.to_ascii_lowercase();
                ct.contains("html") || ct.starts_with("text/plain")
            }
            None => true,
        }
    }
}

/// Source of remote documents
pub trait Fetch {
    /// GET `url`; HTTP error statuses are returned as [`IngestError::Status`]
    fn fetch(&self, url: &str) -> Result<FetchedPage, IngestError>;
}

/// Sync HTTP via ureq (no async runtime needed)
pub struct HttpClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpClient {
    pub fn new(config: &HttpConfig) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();
        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Fetch for HttpClient {
    fn fetch(&self, url: &str) -> Result<FetchedPage, IngestError> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .call()
            .map_err(|source| IngestError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(IngestError::Status {
                url: url.to_string(),
                status,
            });
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .into_body()
            .read_to_vec()
            .map_err(|source| IngestError::Http {
                url: url.to_string(),
                source,
            })?;

        Ok(FetchedPage {
            url: url.to_string(),
            content_type,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }
}
