//! Error types for document segmentation.
//!
//! Unattachable hierarchy nodes and empty inputs are not errors; they are
//! reported through [`crate::core::hierarchy::Hierarchy::dropped`] and logs.

/// Result type alias for segmentation operations.
pub type Result<T> = std::result::Result<T, SegmentError>;

/// Errors that can occur while extracting, segmenting or writing a document.
#[derive(Debug, thiserror::Error)]
pub enum SegmentError {
    /// A style name or marker run could not be turned into a heading level.
    #[error("Malformed heading signal '{signal}': {reason}")]
    MalformedHeadingSignal {
        /// The raw style name or marker prefix
        signal: String,
        /// Why no level could be derived
        reason: String,
    },

    /// A normalizer, extractor or writer was handed a shape it does not support.
    #[error("Unsupported input shape: expected {expected}, found {found}")]
    UnsupportedInputShape {
        /// Shape the collaborator handles
        expected: String,
        /// Shape it was given
        found: String,
    },

    /// No extractor is registered for this file type.
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Zip container error
    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML parse error
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// PDF parsing or text extraction error
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_oxide::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SegmentError {
    pub(crate) fn malformed(signal: impl Into<String>, reason: impl Into<String>) -> Self {
        SegmentError::MalformedHeadingSignal {
            signal: signal.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported_shape(expected: impl Into<String>, found: impl Into<String>) -> Self {
        SegmentError::UnsupportedInputShape {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
