//! Configuration module for geo-audit
//!
//! This module handles:
//! - Criteria thresholds and strict mode
//! - WordPress paging and HTTP settings
//! - Report defaults

mod project_config;

pub use project_config::{
    AuditConfig,
    ConfigError,
    CriteriaConfig,
    HttpConfig,
    OutputConfig,
    WordPressConfig,
    load_config,
    user_config_path,
    CONFIG_FILE_NAME,
};
