pub mod core {
    pub mod signal;
    pub mod normalizer;
    pub mod classifier;
    pub mod importance;
    pub mod hierarchy;
    pub mod projection;
    pub mod segmenter;
    pub mod writer;
}

pub mod extract {
    pub mod docx;
    pub mod geometry;
    pub mod pdf;
    pub mod text;

    mod dispatch;
    pub use dispatch::{extract_path, extractor_for, Extractor};
}

pub mod utils {
    pub mod document_processor;
    pub mod naming;
}

pub mod config;
pub mod error;

pub use crate::config::{FontBands, OutputFormat, SegmenterConfig};
pub use crate::core::importance::ImportanceTable;
pub use crate::core::normalizer::{InputKind, RawInput, StyledUnit, TextRun, Token};
pub use crate::core::segmenter::Segmenter;
pub use crate::error::{Result, SegmentError};

use serde::Serialize;
use std::fmt;

/// A classified, finalized unit of document text.
///
/// Segments are only built by the classifier and never change afterwards,
/// so the fields are private and the kind/level pairing always holds.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Segment {
    kind: SegmentKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
    importance: f64,
    text: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Title,
    Subtitle,
    Paragraph,
}

impl SegmentKind {
    /// Map a heading level to its kind. Level 0 is not a heading level.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => None,
            1 => Some(SegmentKind::Title),
            _ => Some(SegmentKind::Subtitle),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Title => "title",
            SegmentKind::Subtitle => "subtitle",
            SegmentKind::Paragraph => "paragraph",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Segment {
    /// Build a heading segment; the kind follows from the level.
    pub fn heading(level: u8, text: impl Into<String>, importance: f64) -> Result<Self> {
        let kind = SegmentKind::from_level(level).ok_or_else(|| {
            SegmentError::malformed(level.to_string(), "heading levels start at 1")
        })?;
        Ok(Segment {
            kind,
            level: Some(level),
            importance,
            text: text.into().trim().to_string(),
        })
    }

    pub fn paragraph(text: impl Into<String>, importance: f64) -> Self {
        Segment {
            kind: SegmentKind::Paragraph,
            level: None,
            importance,
            text: text.into().trim().to_string(),
        }
    }

    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }

    pub fn importance(&self) -> f64 {
        self.importance
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
