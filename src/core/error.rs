//! Typed error handling for the product table
//!
//! The query pipeline itself never fails: malformed rows are defaulted and
//! invalid state is clamped. Errors only come from the edges of the system:
//!
//! - [`FetchError`]: the product source could not deliver the row list
//! - [`ConfigError`]: the table configuration could not be loaded or is invalid
//!
//! # Example
//!
//! ```rust,ignore
//! use product_table::prelude::*;
//!
//! match source.fetch_all().await {
//!     Ok(rows) => controller.set_rows(rows),
//!     Err(FetchError::Status { status, .. }) if status == 404 => {
//!         eprintln!("product endpoint moved");
//!     }
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

use thiserror::Error;

/// The main error type for the product table
#[derive(Debug, Error)]
pub enum TableError {
    /// The product source failed to deliver rows
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The controller actor is gone or did not answer
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TableError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            TableError::Fetch(e) => e.error_code(),
            TableError::Config(e) => e.error_code(),
            TableError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

// =============================================================================
// Fetch Errors
// =============================================================================

/// Errors raised while fetching the product list
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint answered with a non-success status
    #[error("GET {url} failed: {status}")]
    Status { url: String, status: u16 },

    /// The request never produced a response
    #[error("GET {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The body was not a product list
    #[error("Invalid product list from {url}: {message}")]
    Decode { url: String, message: String },

    /// A source configured to fail (tests, offline mode)
    #[error("{message}")]
    Unavailable { message: String },
}

impl FetchError {
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Status { .. } => "FETCH_STATUS",
            FetchError::Transport { .. } => "FETCH_TRANSPORT",
            FetchError::Decode { .. } => "FETCH_DECODE",
            FetchError::Unavailable { .. } => "FETCH_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config: {message}")]
    ParseError { message: String },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    #[error("IO error: {message}")]
    IoError { message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::ParseError { .. } => "CONFIG_PARSE_ERROR",
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE",
            ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError {
            message: err.to_string(),
        }
    }
}

/// A specialized Result type for product table operations
pub type TableResult<T> = Result<T, TableError>;
