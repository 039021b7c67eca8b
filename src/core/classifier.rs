//! Single-pass segment classification.
//!
//! Headings are emitted as soon as they are seen. Body text is buffered in
//! one accumulator and flushed as a paragraph at the next heading and at
//! end of stream.

use crate::core::importance::ImportanceTable;
use crate::core::normalizer::Token;
use crate::error::Result;
use crate::Segment;

/// How consecutive body lines are grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Consecutive body lines form one paragraph.
    Merge,
    /// Every non-blank body line is its own paragraph.
    LinePerSegment,
}

/// Pending paragraph text. Empty means idle.
#[derive(Debug, Default)]
struct AccumulatorState {
    pending_text: String,
}

impl AccumulatorState {
    fn push(&mut self, text: &str) {
        self.pending_text.push_str(text);
        self.pending_text.push(' ');
    }

    fn flush(&mut self, importance: &ImportanceTable, out: &mut Vec<Segment>) {
        let text = std::mem::take(&mut self.pending_text);
        let text = text.trim();
        if !text.is_empty() {
            out.push(Segment::paragraph(text, importance.paragraph));
        }
    }
}

/// Classify a token stream into ordered segments.
///
/// Fails only when a heading token carries level 0, in which case no
/// segments are returned.
pub fn classify<I>(tokens: I, importance: &ImportanceTable, mode: MergeMode) -> Result<Vec<Segment>>
where
    I: IntoIterator<Item = Token>,
{
    let mut segments = Vec::new();
    let mut state = AccumulatorState::default();

    for token in tokens {
        match token {
            Token::Heading { level, text } => {
                state.flush(importance, &mut segments);
                let segment = Segment::heading(level, text, importance.for_level(level))?;
                if !segment.text().is_empty() {
                    segments.push(segment);
                }
            }
            Token::Body(text) => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                state.push(text);
                if mode == MergeMode::LinePerSegment {
                    state.flush(importance, &mut segments);
                }
            }
        }
    }
    state.flush(importance, &mut segments);

    Ok(segments)
}
