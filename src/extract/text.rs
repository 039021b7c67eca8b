//! Plain and markup text files.

use crate::core::normalizer::{InputKind, RawInput};
use crate::error::{Result, SegmentError};
use crate::extract::Extractor;
use std::path::Path;

const BOM: char = '\u{feff}';

/// Reads a UTF-8 file as either markup or plain text.
#[derive(Debug, Clone, Copy)]
pub struct TextExtractor {
    kind: InputKind,
}

impl TextExtractor {
    /// Only markup and plain text are line-based sources.
    pub fn new(kind: InputKind) -> Result<Self> {
        match kind {
            InputKind::Markup | InputKind::Plain => Ok(Self { kind }),
            other => Err(SegmentError::unsupported_shape("markup or plain", other.to_string())),
        }
    }

    pub fn decode(&self, text: &str) -> RawInput {
        let text = text.strip_prefix(BOM).unwrap_or(text).to_string();
        match self.kind {
            InputKind::Markup => RawInput::Markup(text),
            _ => RawInput::Plain(text),
        }
    }
}

impl Extractor for TextExtractor {
    fn kind(&self) -> InputKind {
        self.kind
    }

    fn extract(&self, path: &Path) -> Result<RawInput> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.decode(&text))
    }
}
