//! Error types for UGC Prompt Studio

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),
}

/// Durable key-value storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage quota exceeded ({needed} bytes needed, quota is {quota} bytes)")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("Storage data corrupted: {0}")]
    Corrupted(String),

    #[error("Storage IO error: {0}")]
    IoError(String),
}

/// User input validation errors. Raised before any network call or state change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a valid image file")]
    NotAnImage(String),

    #[error("File size must be less than {limit_mb}MB (got {size} bytes)")]
    FileTooLarge { size: u64, limit_mb: u64 },

    #[error("Please provide both product name and description")]
    MissingManualInput,

    #[error("Please upload and analyze a product image first")]
    MissingProductAnalysis,

    #[error("Unknown wizard step: {0}")]
    UnknownStep(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}

/// Prompt assembly errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("No product description available; analyze a product image or enter one manually")]
    MissingProductDescription,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("{0}")]
    Remote(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
