//! Client configuration.
//!
//! Defaults match the development setup of the marketplace server; a TOML
//! file at `<data_dir>/config.toml` and `SETU_*` environment variables
//! override them, in that order.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default API endpoint of a locally running marketplace server.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Page size used by the job browse view.
pub const DEFAULT_PAGE_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the marketplace API.
    pub api_base_url: String,
    /// Number of listings fetched per feed page.
    pub page_size: usize,
    /// Directory for durable client state. `None` means the per-user default.
    pub data_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: None,
        }
    }
}

impl ClientConfig {
    /// Parses a configuration from TOML. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Applies `SETU_API_URL`, `SETU_PAGE_SIZE` and `SETU_DATA_DIR`
    /// environment overrides on top of `self`.
    ///
    /// An unparseable `SETU_PAGE_SIZE` is ignored rather than rejected.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("SETU_API_URL") {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        if let Ok(raw) = std::env::var("SETU_PAGE_SIZE") {
            if let Ok(size) = raw.trim().parse::<usize>() {
                if size > 0 {
                    self.page_size = size;
                }
            }
        }
        if let Ok(dir) = std::env::var("SETU_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
        self
    }
}
