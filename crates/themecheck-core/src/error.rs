//! Unified error types for themecheck

use thiserror::Error;

/// Unified error type for all themecheck operations
#[derive(Error, Debug)]
pub enum ThemeCheckError {
    // Browser errors
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("JavaScript evaluation failed: {0}")]
    Evaluation(String),

    #[error("Element not found: {selector}")]
    ElementNotFound { selector: String },

    #[error("Screenshot failed: {0}")]
    ScreenshotFailed(String),

    // Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias using ThemeCheckError
pub type Result<T> = std::result::Result<T, ThemeCheckError>;
