//! Input normalization: one strategy per source kind, each turning the
//! extractor's output into the canonical [`Token`] stream.

use crate::config::SegmenterConfig;
use crate::core::signal::{self, HeadingSignal};
use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One classified input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Heading { level: u8, text: String },
    Body(String),
}

impl From<HeadingSignal> for Token {
    fn from(signal: HeadingSignal) -> Self {
        Token::Heading {
            level: signal.level,
            text: signal.text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Paragraphs carrying a style name (word-processor documents).
    Structured,
    /// Lines with marker-prefixed headings (Markdown-like text).
    Markup,
    /// Text runs with measured font heights (PDF word extraction).
    Geometry,
    /// Raw lines without any heading signal.
    Plain,
}

impl InputKind {
    /// Whether consecutive body lines collapse into one paragraph.
    ///
    /// Plain text has no heading boundaries, so each non-blank line stays
    /// its own paragraph.
    pub fn merges_body(&self) -> bool {
        !matches!(self, InputKind::Plain)
    }

    /// Source kind implied by a file name, if any extractor handles it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_string_lossy().to_lowercase();
        if name.ends_with(".words.json") || name.ends_with(".pdf") {
            return Some(InputKind::Geometry);
        }
        let ext = path.as_ref().extension()?.to_string_lossy().to_lowercase();
        match ext.as_str() {
            "docx" => Some(InputKind::Structured),
            "md" | "markdown" => Some(InputKind::Markup),
            "txt" => Some(InputKind::Plain),
            _ => None,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputKind::Structured => "structured",
            InputKind::Markup => "markup",
            InputKind::Geometry => "geometry",
            InputKind::Plain => "plain",
        };
        f.write_str(name)
    }
}

/// A paragraph from a structured document and the name of its style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledUnit {
    pub text: String,
    pub style_name: Option<String>,
}

impl StyledUnit {
    pub fn new(text: impl Into<String>, style_name: Option<&str>) -> Self {
        Self {
            text: text.into(),
            style_name: style_name.map(str::to_string),
        }
    }

    pub fn body(text: impl Into<String>) -> Self {
        Self::new(text, None)
    }
}

/// A run of text and its measured height in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    pub text: String,
    pub height: f64,
}

impl TextRun {
    pub fn new(text: impl Into<String>, height: f64) -> Self {
        Self {
            text: text.into(),
            height,
        }
    }
}

/// Already-decoded extractor output, tagged with its source kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    Structured(Vec<StyledUnit>),
    Markup(String),
    Geometry(Vec<TextRun>),
    Plain(String),
}

impl RawInput {
    pub fn kind(&self) -> InputKind {
        match self {
            RawInput::Structured(_) => InputKind::Structured,
            RawInput::Markup(_) => InputKind::Markup,
            RawInput::Geometry(_) => InputKind::Geometry,
            RawInput::Plain(_) => InputKind::Plain,
        }
    }
}

pub trait InputNormalizer {
    /// Source kind this normalizer accepts.
    fn kind(&self) -> InputKind;

    /// Turn raw input into tokens. Input of another kind is rejected with
    /// [`SegmentError::UnsupportedInputShape`].
    fn normalize(&self, raw: &RawInput) -> Result<Vec<Token>>;
}

fn wrong_shape(expected: InputKind, raw: &RawInput) -> SegmentError {
    SegmentError::unsupported_shape(expected.to_string(), raw.kind().to_string())
}

/// Heading level from the paragraph style name.
pub struct StyleNormalizer {
    prefix: String,
}

impl StyleNormalizer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl InputNormalizer for StyleNormalizer {
    fn kind(&self) -> InputKind {
        InputKind::Structured
    }

    fn normalize(&self, raw: &RawInput) -> Result<Vec<Token>> {
        let RawInput::Structured(units) = raw else {
            return Err(wrong_shape(self.kind(), raw));
        };

        let mut tokens = Vec::with_capacity(units.len());
        for unit in units {
            // Empty paragraphs are skipped before their style is looked at.
            if signal::normalize_body_text(&unit.text).is_empty() {
                continue;
            }
            let level = match unit.style_name.as_deref() {
                Some(style) => signal::style_level(style, &self.prefix)?,
                None => None,
            };
            tokens.push(match level {
                Some(level) => Token::Heading {
                    level,
                    text: signal::normalize_heading_text(&unit.text),
                },
                None => Token::Body(signal::normalize_body_text(&unit.text)),
            });
        }
        Ok(tokens)
    }
}

/// Heading level from the count of leading marker characters.
pub struct MarkupNormalizer {
    marker: char,
}

impl MarkupNormalizer {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }
}

impl InputNormalizer for MarkupNormalizer {
    fn kind(&self) -> InputKind {
        InputKind::Markup
    }

    fn normalize(&self, raw: &RawInput) -> Result<Vec<Token>> {
        let RawInput::Markup(text) = raw else {
            return Err(wrong_shape(self.kind(), raw));
        };

        let mut tokens = Vec::new();
        for line in text.lines() {
            match signal::marker_heading(line, self.marker)? {
                // A bare marker run carries no text to keep.
                Some(heading) if heading.text.is_empty() => {
                    log::debug!("Skipping empty level {} heading", heading.level);
                }
                Some(heading) => tokens.push(heading.into()),
                None => tokens.push(Token::Body(signal::normalize_body_text(line))),
            }
        }
        Ok(tokens)
    }
}

/// Heading level from font height bands.
pub struct GeometryNormalizer {
    bands: crate::config::FontBands,
}

impl GeometryNormalizer {
    pub fn new(bands: crate::config::FontBands) -> Self {
        Self { bands }
    }
}

impl InputNormalizer for GeometryNormalizer {
    fn kind(&self) -> InputKind {
        InputKind::Geometry
    }

    fn normalize(&self, raw: &RawInput) -> Result<Vec<Token>> {
        let RawInput::Geometry(runs) = raw else {
            return Err(wrong_shape(self.kind(), raw));
        };

        let tokens = runs
            .iter()
            .filter_map(|run| match signal::font_level(run.height, &self.bands) {
                Some(level) => {
                    let text = signal::normalize_heading_text(&run.text);
                    (!text.is_empty()).then_some(Token::Heading { level, text })
                }
                None => Some(Token::Body(signal::normalize_body_text(&run.text))),
            })
            .collect();
        Ok(tokens)
    }
}

/// Every line is body text.
pub struct PlainNormalizer;

impl InputNormalizer for PlainNormalizer {
    fn kind(&self) -> InputKind {
        InputKind::Plain
    }

    fn normalize(&self, raw: &RawInput) -> Result<Vec<Token>> {
        let RawInput::Plain(text) = raw else {
            return Err(wrong_shape(self.kind(), raw));
        };
        Ok(text
            .lines()
            .map(|line| Token::Body(signal::normalize_body_text(line)))
            .collect())
    }
}

/// Normalizer for `kind`, configured from `config`.
pub fn normalizer_for(kind: InputKind, config: &SegmenterConfig) -> Box<dyn InputNormalizer> {
    match kind {
        InputKind::Structured => Box::new(StyleNormalizer::new(config.heading_style_prefix.clone())),
        InputKind::Markup => Box::new(MarkupNormalizer::new(config.heading_marker)),
        InputKind::Geometry => Box::new(GeometryNormalizer::new(config.font_bands)),
        InputKind::Plain => Box::new(PlainNormalizer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontBands;

    fn heading(level: u8, text: &str) -> Token {
        Token::Heading {
            level,
            text: text.to_string(),
        }
    }

    fn body(text: &str) -> Token {
        Token::Body(text.to_string())
    }

    #[test]
    fn test_style_normalizer() {
        let raw = RawInput::Structured(vec![
            StyledUnit::new("Intro", Some("Heading 1")),
            StyledUnit::new("  ", Some("Heading")),
            StyledUnit::new("First\u{a0}line", Some("Normal")),
            StyledUnit::body("second"),
            StyledUnit::new("Deep", Some("Heading 3")),
        ]);
        let tokens = StyleNormalizer::new("Heading").normalize(&raw).unwrap();
        assert_eq!(
            tokens,
            vec![heading(1, "Intro"), body("First line"), body("second"), heading(3, "Deep")]
        );
    }

    #[test]
    fn test_style_normalizer_malformed() {
        let raw = RawInput::Structured(vec![
            StyledUnit::new("Intro", Some("Heading 1")),
            StyledUnit::new("Broken", Some("Heading")),
        ]);
        let err = StyleNormalizer::new("Heading").normalize(&raw).unwrap_err();
        assert!(matches!(err, SegmentError::MalformedHeadingSignal { .. }));
    }

    #[test]
    fn test_markup_normalizer() {
        let raw = RawInput::Markup("# Intro\n\nHello world\n## Details\n#\n".to_string());
        let tokens = MarkupNormalizer::new('#').normalize(&raw).unwrap();
        assert_eq!(
            tokens,
            vec![heading(1, "Intro"), body(""), body("Hello world"), heading(2, "Details")]
        );
    }

    #[test]
    fn test_geometry_normalizer() {
        let raw = RawInput::Geometry(vec![
            TextRun::new("Big", 18.0),
            TextRun::new("Medium", 14.0),
            TextRun::new("small", 10.0),
            TextRun::new("   ", 20.0),
        ]);
        let tokens = GeometryNormalizer::new(FontBands::default())
            .normalize(&raw)
            .unwrap();
        assert_eq!(tokens, vec![heading(1, "Big"), heading(2, "Medium"), body("small")]);
    }

    #[test]
    fn test_plain_normalizer_never_emits_headings() {
        let raw = RawInput::Plain("# not a heading\nline".to_string());
        let tokens = PlainNormalizer.normalize(&raw).unwrap();
        assert_eq!(tokens, vec![body("# not a heading"), body("line")]);
    }

    #[test]
    fn test_wrong_shape_rejected() {
        let raw = RawInput::Plain("text".to_string());
        let err = MarkupNormalizer::new('#').normalize(&raw).unwrap_err();
        match err {
            SegmentError::UnsupportedInputShape { expected, found } => {
                assert_eq!(expected, "markup");
                assert_eq!(found, "plain");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kind_from_path() {
        assert_eq!(InputKind::from_path("a/report.DOCX"), Some(InputKind::Structured));
        assert_eq!(InputKind::from_path("notes.md"), Some(InputKind::Markup));
        assert_eq!(InputKind::from_path("scan.words.json"), Some(InputKind::Geometry));
        assert_eq!(InputKind::from_path("readme.txt"), Some(InputKind::Plain));
        assert_eq!(InputKind::from_path("paper.PDF"), Some(InputKind::Geometry));
        assert_eq!(InputKind::from_path("data.json"), None);
    }

    #[test]
    fn test_normalizer_for_matches_kind() {
        let config = SegmenterConfig::default();
        for kind in [InputKind::Structured, InputKind::Markup, InputKind::Geometry, InputKind::Plain] {
            assert_eq!(normalizer_for(kind, &config).kind(), kind);
        }
    }
}
