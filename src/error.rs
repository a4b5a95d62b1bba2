// src/error.rs

//! Unified error handling for the catalogue crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// SQLite operation failed
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Page fetch failed after retries
    #[error("Fetch error for {program_key}: {message}")]
    Fetch {
        program_key: String,
        message: String,
    },

    /// Document had an unexpected shape
    #[error("Parse error for {context}: {message}")]
    Parse { context: String, message: String },

    /// Persistence failed at program, block, or course granularity
    #[error("Persist error for {context}: {message}")]
    Persist { context: String, message: String },
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a fetch error tied to a program key or URL.
    pub fn fetch(program_key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Fetch {
            program_key: program_key.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error with context.
    pub fn parse(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a persistence error with context.
    pub fn persist(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Persist {
            context: context.into(),
            message: message.to_string(),
        }
    }
}
