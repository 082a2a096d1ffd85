//! Error types for memorial.
//!
//! All fallible operations in the crate return [`Result`], whose error type is
//! [`MemorialError`]. The taxonomy follows the pipeline's failure model:
//!
//! - **System errors bubble up unchanged**: `MemorialError::Io` surfaces file
//!   system and permission problems without wrapping.
//! - **Collaborator failures degrade, they do not propagate**: a render, OCR,
//!   or projection failure inside the pipeline is caught at the collaborator
//!   boundary and reduces that stage's output to empty. The error variants
//!   here cover construction and configuration paths, where failing loudly is
//!   the right behavior.
//! - **Insufficient input is never an error**: a text with too few coordinate
//!   pairs produces a short vertex list, and the caller decides what a short
//!   ring means.
use thiserror::Error;

/// Result type alias using [`MemorialError`].
pub type Result<T> = std::result::Result<T, MemorialError>;

/// Main error type for all memorial operations.
#[derive(Debug, Error)]
pub enum MemorialError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Projection error: {message}")]
    Projection {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for MemorialError {
    fn from(err: serde_json::Error) -> Self {
        MemorialError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

#[cfg(feature = "pdf")]
impl From<crate::pdf::error::PdfError> for MemorialError {
    fn from(err: crate::pdf::error::PdfError) -> Self {
        MemorialError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl MemorialError {
    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error.
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error with source.
    pub fn ocr_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ocr {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Projection error.
    pub fn projection<S: Into<String>>(message: S) -> Self {
        Self::Projection {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error.
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Validation error with source.
    pub fn validation_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Validation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
