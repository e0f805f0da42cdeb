//! Configuration loading and management

use crate::core::ConfigError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default product listing endpoint
pub const PRODUCTS_API: &str = "https://api.escuelajs.co/api/v1/products";

/// Complete configuration for a product table
///
/// Every field has a default, so an empty document is a valid configuration:
///
/// ```yaml
/// api_url: https://api.escuelajs.co/api/v1/products
/// page_size: 5
/// page_size_options: [5, 10, 20]
/// debounce_ms: 300
/// request_timeout_secs: 10
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Endpoint returning the product list as a JSON array
    pub api_url: String,

    /// Initial number of rows per page
    pub page_size: usize,

    /// Page sizes offered to the user (empty allows any size)
    pub page_size_options: Vec<usize>,

    /// Quiet window before a search recomputes, in milliseconds
    pub debounce_ms: u64,

    /// Timeout for the product request, in seconds
    pub request_timeout_secs: u64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            api_url: PRODUCTS_API.to_string(),
            page_size: crate::core::query::default_page_size(),
            page_size_options: vec![5, 10, 20],
            debounce_ms: 300,
            request_timeout_secs: 10,
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    ///
    /// The result is validated; an invalid document is an error.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the table cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: self.page_size.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if let Some(zero) = self.page_size_options.iter().find(|size| **size == 0) {
            return Err(ConfigError::InvalidValue {
                field: "page_size_options".to_string(),
                value: zero.to_string(),
                message: "page sizes must be at least 1".to_string(),
            });
        }

        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&self.page_size)
        {
            return Err(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: self.page_size.to_string(),
                message: format!("must be one of {:?}", self.page_size_options),
            });
        }

        if self.debounce_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "debounce_ms".to_string(),
                value: self.debounce_ms.to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Whether `page_size` may be selected by the user
    pub fn allows_page_size(&self, page_size: usize) -> bool {
        page_size > 0
            && (self.page_size_options.is_empty() || self.page_size_options.contains(&page_size))
    }

    /// Debounce window as a duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
