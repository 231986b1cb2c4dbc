//! Application configuration
//!
//! Loaded from a single JSON file. Every field has a default, so an empty
//! object (or no file at all) yields a working local setup.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::DEFAULT_MAX_BULK_BYTES;
use crate::http_server::HttpServerConfig;
use crate::search::DEFAULT_PAGE_SIZE;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Engine base URL (default: "http://localhost:9200")
    #[serde(default = "default_elasticsearch_url")]
    pub elasticsearch_url: String,

    /// Product index name (default: "products")
    #[serde(default = "default_index")]
    pub index: String,

    /// Hits per page (default: 16)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Bulk chunk limit in bytes (default: 5 MiB)
    #[serde(default = "default_max_bulk_size_bytes")]
    pub max_bulk_size_bytes: usize,

    /// Products generated when the admin endpoint gets no positive count
    #[serde(default = "default_product_count")]
    pub default_product_count: usize,

    #[serde(default)]
    pub http: HttpServerConfig,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_elasticsearch_url() -> String {
    "http://localhost:9200".to_string()
}
fn default_index() -> String {
    "products".to_string()
}
fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}
fn default_max_bulk_size_bytes() -> usize {
    DEFAULT_MAX_BULK_BYTES
}
fn default_product_count() -> usize {
    50_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            elasticsearch_url: default_elasticsearch_url(),
            index: default_index(),
            page_size: default_page_size(),
            max_bulk_size_bytes: default_max_bulk_size_bytes(),
            default_product_count: default_product_count(),
            http: HttpServerConfig::default(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let url = self.elasticsearch_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "elasticsearch_url must be an http(s) URL, got '{}'",
                self.elasticsearch_url
            )));
        }

        if self.index.trim().is_empty() {
            return Err(ConfigError::Invalid("index must not be empty".to_string()));
        }

        if self.page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be > 0".to_string()));
        }

        if self.max_bulk_size_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_bulk_size_bytes must be > 0".to_string(),
            ));
        }

        if self.default_product_count == 0 {
            return Err(ConfigError::Invalid(
                "default_product_count must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_defaults() {
        let file = write_config("{}");
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.elasticsearch_url, "http://localhost:9200");
        assert_eq!(config.index, "products");
        assert_eq!(config.page_size, 16);
        assert_eq!(config.max_bulk_size_bytes, 5 * 1024 * 1024);
        assert_eq!(config.default_product_count, 50_000);
        assert_eq!(config.http.port, 8080);
        assert!(!config.log_json);
    }

    #[test]
    fn test_config_overrides() {
        let file = write_config(
            r#"{"elasticsearch_url": "https://es.internal:9243", "index": "catalog",
                "page_size": 24, "http": {"port": 9000}, "log_json": true}"#,
        );
        let config = AppConfig::load(file.path()).unwrap();

        assert_eq!(config.index, "catalog");
        assert_eq!(config.page_size, 24);
        assert_eq!(config.http.port, 9000);
        assert_eq!(config.http.host, "0.0.0.0");
        assert!(config.log_json);
    }

    #[test]
    fn test_config_rejects_zero_page_size() {
        let file = write_config(r#"{"page_size": 0}"#);
        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_config_rejects_non_http_url() {
        let file = write_config(r#"{"elasticsearch_url": "localhost:9200"}"#);
        assert!(matches!(
            AppConfig::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_config_bad_json() {
        let file = write_config("{not json");
        assert!(matches!(AppConfig::load(file.path()), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_path_uses_defaults() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.index, "products");
    }
}
