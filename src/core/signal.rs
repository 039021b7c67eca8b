//! Heading signal extraction.
//!
//! Each source kind carries its "is this a heading" cue differently: a
//! paragraph style name, a run of leading marker characters, or a font
//! height. The functions here reduce each cue to a level, plus the display
//! text for markup lines.

use crate::config::FontBands;
use crate::error::{Result, SegmentError};

const NBSP: char = '\u{00A0}';

/// A heading level and its cleaned display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSignal {
    pub level: u8,
    pub text: String,
}

/// Convert non-breaking spaces, collapse whitespace runs and trim.
pub fn normalize_heading_text(text: &str) -> String {
    text.replace(NBSP, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Convert non-breaking spaces and trim; inner spacing of body text is kept.
pub fn normalize_body_text(text: &str) -> String {
    text.replace(NBSP, " ").trim().to_string()
}

/// Level encoded in a paragraph style name such as `Heading 2`.
///
/// Returns `Ok(None)` when the style is not a heading style. A heading style
/// whose suffix is not a level in `1..=255` is malformed.
pub fn style_level(style_name: &str, prefix: &str) -> Result<Option<u8>> {
    let Some(suffix) = style_name.strip_prefix(prefix) else {
        return Ok(None);
    };
    let suffix = suffix.trim();

    if suffix.is_empty() || !suffix.chars().all(|c| c.is_ascii_digit()) {
        return Err(SegmentError::malformed(
            style_name,
            "heading style has no numeric level suffix",
        ));
    }
    match suffix.parse::<u8>() {
        Ok(0) => Err(SegmentError::malformed(style_name, "heading levels start at 1")),
        Ok(level) => Ok(Some(level)),
        Err(_) => Err(SegmentError::malformed(style_name, "heading level out of range")),
    }
}

/// Heading signal of a markup line, e.g. `## Details` → level 2, `Details`.
///
/// Leading whitespace is ignored. An optional closing run of markers
/// (`## Details ##`) is removed when whitespace separates it from the text.
pub fn marker_heading(line: &str, marker: char) -> Result<Option<HeadingSignal>> {
    let trimmed = line.trim_start();
    let count = trimmed.chars().take_while(|&c| c == marker).count();
    if count == 0 {
        return Ok(None);
    }

    let level = u8::try_from(count).map_err(|_| {
        let prefix: String = trimmed.chars().take(8).collect();
        SegmentError::malformed(
            format!("{}...", prefix),
            format!("{} heading markers exceed the maximum level", count),
        )
    })?;

    let rest = &trimmed[count * marker.len_utf8()..];
    let text = normalize_heading_text(strip_closing_markers(rest, marker));
    Ok(Some(HeadingSignal { level, text }))
}

fn strip_closing_markers(text: &str, marker: char) -> &str {
    let text = text.trim_end();
    let without_markers = text.trim_end_matches(marker);
    if without_markers.len() == text.len() {
        return text;
    }
    if without_markers.is_empty() || without_markers.ends_with(char::is_whitespace) {
        without_markers
    } else {
        text
    }
}

/// Heading level implied by a measured text height.
pub fn font_level(height: f64, bands: &FontBands) -> Option<u8> {
    if !height.is_finite() {
        return None;
    }
    if height >= bands.title_min {
        Some(1)
    } else if height >= bands.subtitle_min {
        Some(2)
    } else {
        None
    }
}
