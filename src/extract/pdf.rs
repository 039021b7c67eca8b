//! PDF documents, read as text lines with their font size.
//!
//! Spans come from `pdf_oxide` in reading order. Spans sharing a baseline
//! are joined into one line, and the line keeps the largest font size seen
//! on it, so a heading split across several spans stays one heading run.

use crate::core::normalizer::{InputKind, RawInput, TextRun};
use crate::error::Result;
use crate::extract::Extractor;
use pdf_oxide::PdfDocument;
use std::path::Path;

/// A piece of page text with its vertical position and font size.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedText {
    pub text: String,
    pub y: f32,
    pub font_size: f32,
}

impl PositionedText {
    pub fn new(text: impl Into<String>, y: f32, font_size: f32) -> Self {
        Self {
            text: text.into(),
            y,
            font_size,
        }
    }
}

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for PdfExtractor {
    fn kind(&self) -> InputKind {
        InputKind::Geometry
    }

    fn extract(&self, path: &Path) -> Result<RawInput> {
        let mut doc = PdfDocument::open(path)?;
        let page_count = doc.page_count()?;

        let mut runs = Vec::new();
        for page in 0..page_count {
            let spans = match doc.extract_spans(page) {
                Ok(spans) => spans,
                Err(e) => {
                    log::warn!("Skipping page {} of {}: {}", page + 1, path.display(), e);
                    continue;
                }
            };
            let pieces: Vec<PositionedText> = spans
                .into_iter()
                .map(|span| PositionedText::new(span.text, span.bbox.y, span.font_size))
                .collect();
            runs.extend(group_lines(&pieces));
        }

        log::debug!(
            "Read {} lines from {} pages of {}",
            runs.len(),
            page_count,
            path.display()
        );
        Ok(RawInput::Geometry(runs))
    }
}

/// Join consecutive pieces on the same baseline into text runs.
///
/// Two pieces share a line when their `y` differs by less than half the
/// smaller font size. Whitespace-only lines are left out.
pub fn group_lines(pieces: &[PositionedText]) -> Vec<TextRun> {
    let mut runs = Vec::new();
    let mut line: Option<(String, f32, f32, f32)> = None;

    for piece in pieces {
        if let Some((text, y, min_size, max_size)) = line.as_mut() {
            let tolerance = min_size.min(piece.font_size).max(1.0) / 2.0;
            if (piece.y - *y).abs() < tolerance {
                let needs_space = !text.is_empty()
                    && !text.ends_with(char::is_whitespace)
                    && !piece.text.starts_with(char::is_whitespace);
                if needs_space {
                    text.push(' ');
                }
                text.push_str(&piece.text);
                *min_size = min_size.min(piece.font_size);
                *max_size = max_size.max(piece.font_size);
                continue;
            }
        }
        if let Some((text, _, _, max_size)) = line.take() {
            push_line(&mut runs, text, max_size);
        }
        line = Some((piece.text.clone(), piece.y, piece.font_size, piece.font_size));
    }
    if let Some((text, _, _, max_size)) = line {
        push_line(&mut runs, text, max_size);
    }
    runs
}

fn push_line(runs: &mut Vec<TextRun>, text: String, font_size: f32) {
    if !text.trim().is_empty() {
        runs.push(TextRun::new(text, f64::from(font_size)));
    }
}
