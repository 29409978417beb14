//! Custom error types for illustration extraction

use std::fmt;
use std::io;

/// Errors raised while extracting illustrations or rewriting lessons
#[derive(Debug)]
pub enum IllustError {
    /// I/O error
    IoError(io::Error),
    /// Image decoding or encoding error
    ImageError(image::ImageError),
    /// The external rasterizer failed
    RasterizeError(String),
    /// Invalid extraction parameters
    InvalidParameters(String),
    /// Configuration file could not be parsed
    ConfigError(String),
    /// Lesson JSON could not be parsed or written
    JsonError(serde_json::Error),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for IllustError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IllustError::IoError(e) => write!(f, "I/O error: {}", e),
            IllustError::ImageError(e) => write!(f, "Image error: {}", e),
            IllustError::RasterizeError(msg) => write!(f, "Rasterizer failed: {}", msg),
            IllustError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            IllustError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            IllustError::JsonError(e) => write!(f, "Lesson JSON error: {}", e),
            IllustError::GenericError(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for IllustError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllustError::IoError(e) => Some(e),
            IllustError::ImageError(e) => Some(e),
            IllustError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IllustError {
    fn from(error: io::Error) -> Self {
        IllustError::IoError(error)
    }
}

impl From<image::ImageError> for IllustError {
    fn from(error: image::ImageError) -> Self {
        IllustError::ImageError(error)
    }
}

impl From<serde_json::Error> for IllustError {
    fn from(error: serde_json::Error) -> Self {
        IllustError::JsonError(error)
    }
}

impl From<toml::de::Error> for IllustError {
    fn from(error: toml::de::Error) -> Self {
        IllustError::ConfigError(error.to_string())
    }
}

/// Result type for illustration operations
pub type IllustResult<T> = Result<T, IllustError>;
