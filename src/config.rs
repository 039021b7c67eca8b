//! Segmenter configuration, loaded from JSON with per-field defaults.

use crate::core::importance::ImportanceTable;
use crate::error::{Result, SegmentError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Font height bands used by the font-metric heading strategy.
///
/// `height >= title_min` is a title, `subtitle_min <= height < title_min`
/// a subtitle, anything smaller is body text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontBands {
    pub title_min: f64,
    pub subtitle_min: f64,
}

impl Default for FontBands {
    fn default() -> Self {
        Self {
            title_min: 16.0,
            subtitle_min: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Flat,
    Hierarchical,
}

impl FromStr for OutputFormat {
    type Err = SegmentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(OutputFormat::Flat),
            "hierarchical" | "tree" => Ok(OutputFormat::Hierarchical),
            other => Err(SegmentError::InvalidConfig(format!(
                "unknown output format '{}', expected flat or hierarchical",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Flat => f.write_str("flat"),
            OutputFormat::Hierarchical => f.write_str("hierarchical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterConfig {
    pub importance: ImportanceTable,
    pub font_bands: FontBands,
    /// Style names starting with this prefix are headings, e.g. `Heading 2`.
    pub heading_style_prefix: String,
    /// Marker repeated at the start of a markup heading line.
    pub heading_marker: char,
    pub format: OutputFormat,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            importance: ImportanceTable::default(),
            font_bands: FontBands::default(),
            heading_style_prefix: "Heading".to_string(),
            heading_marker: '#',
            format: OutputFormat::Flat,
        }
    }
}

impl SegmenterConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SegmenterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        self.importance.validate()?;

        let bands = &self.font_bands;
        if !bands.title_min.is_finite() || !bands.subtitle_min.is_finite() {
            return Err(SegmentError::InvalidConfig("font bands must be finite".into()));
        }
        if bands.subtitle_min <= 0.0 {
            return Err(SegmentError::InvalidConfig(
                "font_bands.subtitle_min must be positive".into(),
            ));
        }
        if bands.title_min <= bands.subtitle_min {
            return Err(SegmentError::InvalidConfig(format!(
                "font_bands.title_min ({}) must be greater than subtitle_min ({})",
                bands.title_min, bands.subtitle_min
            )));
        }
        if self.heading_style_prefix.trim().is_empty() {
            return Err(SegmentError::InvalidConfig(
                "heading_style_prefix must not be empty".into(),
            ));
        }
        if self.heading_marker.is_whitespace() {
            return Err(SegmentError::InvalidConfig(
                "heading_marker must not be whitespace".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SegmenterConfig::default();
        config.validate().unwrap();
        assert_eq!(config.heading_marker, '#');
        assert_eq!(config.format, OutputFormat::Flat);
    }

    #[test]
    fn test_from_json_overrides_selected_fields() {
        let config = SegmenterConfig::from_json_str(
            r#"{
                "importance": { "subtitle_l3plus": 1.2 },
                "font_bands": { "title_min": 20.0 },
                "format": "hierarchical"
            }"#,
        )
        .unwrap();
        assert_eq!(config.importance.subtitle_l3plus, 1.2);
        assert_eq!(config.importance.title, 2.0);
        assert_eq!(config.font_bands.title_min, 20.0);
        assert_eq!(config.font_bands.subtitle_min, 12.0);
        assert_eq!(config.format, OutputFormat::Hierarchical);
    }

    #[test]
    fn test_inverted_bands_rejected() {
        let err = SegmenterConfig::from_json_str(
            r#"{ "font_bands": { "title_min": 10.0, "subtitle_min": 12.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, SegmentError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(SegmenterConfig::from_json_str(r#"{ "colour": "red" }"#).is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("flat".parse::<OutputFormat>().unwrap(), OutputFormat::Flat);
        assert_eq!(
            "Hierarchical".parse::<OutputFormat>().unwrap(),
            OutputFormat::Hierarchical
        );
        assert!("csv".parse::<OutputFormat>().is_err());
    }
}
