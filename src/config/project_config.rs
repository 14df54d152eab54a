//! Audit configuration support
//!
//! Loads thresholds and adapter settings from `geo-audit.toml`.
//!
//! # Configuration Format
//!
//! ```toml
//! # geo-audit.toml
//!
//! [criteria]
//! min_words = 500
//! meta_min_len = 120
//! meta_max_len = 160
//! strict = false
//!
//! [wordpress]
//! max_pages = 50
//! per_page = 100
//! delay_ms = 200
//!
//! [http]
//! timeout_secs = 20
//!
//! [output]
//! page_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "geo-audit.toml";

/// Fatal configuration problems, detected before ingestion starts
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No input given: --input is required for source '{source_kind}'")]
    MissingInput { source_kind: String },

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid WordPress endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Full configuration for one audit run
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub criteria: CriteriaConfig,

    #[serde(default)]
    pub wordpress: WordPressConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl AuditConfig {
    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.criteria;
        if c.meta_min_len > c.meta_max_len {
            return Err(ConfigError::InvalidThreshold(format!(
                "meta_min_len ({}) exceeds meta_max_len ({})",
                c.meta_min_len, c.meta_max_len
            )));
        }
        if c.min_headings == 0 {
            return Err(ConfigError::InvalidThreshold(
                "min_headings must be at least 1".to_string(),
            ));
        }
        if c.min_list_items == 0 {
            return Err(ConfigError::InvalidThreshold(
                "min_list_items must be at least 1".to_string(),
            ));
        }
        if self.output.page_size == 0 {
            return Err(ConfigError::InvalidThreshold(
                "page_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Thresholds for the ten criteria
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CriteriaConfig {
    /// Minimum words in the opening sentence for a direct answer (default: 6)
    #[serde(default = "default_min_intro_words")]
    pub min_intro_words: usize,

    /// Minimum H2-H4 headings (default: 2)
    #[serde(default = "default_min_headings")]
    pub min_headings: usize,

    /// Minimum numerals in the body (default: 1)
    #[serde(default = "default_min_numbers")]
    pub min_numbers: usize,

    /// Minimum items in at least one list (default: 2)
    #[serde(default = "default_min_list_items")]
    pub min_list_items: usize,

    /// Minimum body word count (default: 500)
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Meta description length bounds, inclusive (default: 120-160)
    #[serde(default = "default_meta_min_len")]
    pub meta_min_len: usize,

    #[serde(default = "default_meta_max_len")]
    pub meta_max_len: usize,

    /// Stricter definition, facts and citation checks
    #[serde(default)]
    pub strict: bool,
}

impl Default for CriteriaConfig {
    fn default() -> Self {
        Self {
            min_intro_words: default_min_intro_words(),
            min_headings: default_min_headings(),
            min_numbers: default_min_numbers(),
            min_list_items: default_min_list_items(),
            min_words: default_min_words(),
            meta_min_len: default_meta_min_len(),
            meta_max_len: default_meta_max_len(),
            strict: false,
        }
    }
}

fn default_min_intro_words() -> usize {
    6
}
fn default_min_headings() -> usize {
    2
}
fn default_min_numbers() -> usize {
    1
}
fn default_min_list_items() -> usize {
    2
}
fn default_min_words() -> usize {
    500
}
fn default_meta_min_len() -> usize {
    120
}
fn default_meta_max_len() -> usize {
    160
}

/// WordPress REST paging
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WordPressConfig {
    /// Safety limit on pages fetched (default: 50)
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Posts per page, clamped to 1..=100 (default: 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Pause between page requests in milliseconds (default: 200)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for WordPressConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            per_page: default_per_page(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_max_pages() -> usize {
    50
}
fn default_per_page() -> usize {
    100
}
fn default_delay_ms() -> u64 {
    200
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    20
}
fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; GeoAuditTool/1.0)".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Rows per page in the HTML report (default: 10)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

/// Load configuration.
///
/// Priority:
/// 1. `explicit` path (must exist and parse)
/// 2. `geo-audit.toml` in `dir`
/// 3. `~/.config/geo-audit/config.toml`
/// 4. defaults
///
/// Implicitly discovered files that fail to parse are logged and skipped.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<AuditConfig, ConfigError> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)?;
        debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let candidates = [Some(dir.join(CONFIG_FILE_NAME)), user_config_path()];
    for path in candidates.into_iter().flatten() {
        if !path.exists() {
            continue;
        }
        match load_toml_config(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
            Err(e) => warn!("{}", e),
        }
    }

    debug!("No config found, using defaults");
    Ok(AuditConfig::default())
}

/// User-level config path (`~/.config/geo-audit/config.toml`)
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("geo-audit").join("config.toml"))
}

fn load_toml_config(path: &Path) -> Result<AuditConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuditConfig::default();
        assert_eq!(config.criteria.min_words, 500);
        assert_eq!(config.criteria.meta_min_len, 120);
        assert_eq!(config.criteria.meta_max_len, 160);
        assert_eq!(config.wordpress.per_page, 100);
        assert_eq!(config.output.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AuditConfig = toml::from_str(
            r#"
[criteria]
min_words = 800
strict = true

[wordpress]
delay_ms = 0
"#,
        )
        .expect("parse config");
        assert_eq!(config.criteria.min_words, 800);
        assert!(config.criteria.strict);
        assert_eq!(config.criteria.min_headings, 2);
        assert_eq!(config.wordpress.delay_ms, 0);
        assert_eq!(config.wordpress.max_pages, 50);
    }

    #[test]
    fn test_validate_rejects_inverted_meta_bounds() {
        let mut config = AuditConfig::default();
        config.criteria.meta_min_len = 200;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[output]\npage_size = 25\n",
        )
        .expect("write config");
        let config = load_config(dir.path(), None).expect("load");
        assert_eq!(config.output.page_size, 25);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config(dir.path(), Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_explicit_invalid_file_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[criteria\nmin_words = ").expect("write");
        assert!(matches!(
            load_config(dir.path(), Some(&path)),
            Err(ConfigError::Parse { .. })
        ));
    }
}
