//! The segmentation pipeline: normalize → classify → project.

use crate::config::SegmenterConfig;
use crate::core::classifier::{self, MergeMode};
use crate::core::hierarchy::{Hierarchy, HierarchyBuilder};
use crate::core::normalizer::{normalizer_for, RawInput};
use crate::core::projection::{self, Projection};
use crate::error::Result;
use crate::Segment;

/// Runs one document at a time. Holds no per-document state, so a single
/// instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Classify one document into its flat segment sequence.
    ///
    /// A malformed heading signal fails the whole document. An input with
    /// no text yields an empty sequence.
    pub fn segment(&self, input: &RawInput) -> Result<Vec<Segment>> {
        let kind = input.kind();
        let tokens = normalizer_for(kind, &self.config).normalize(input)?;
        log::debug!("Normalized {} input into {} tokens", kind, tokens.len());

        let mode = if kind.merges_body() {
            MergeMode::Merge
        } else {
            MergeMode::LinePerSegment
        };
        let segments = classifier::classify(tokens, &self.config.importance, mode)?;

        if segments.is_empty() {
            log::warn!("{} input produced no segments", kind);
        } else {
            log::debug!("Classified {} segments", segments.len());
        }
        Ok(segments)
    }

    /// Shape segments using the configured output format.
    pub fn project(&self, segments: &[Segment]) -> Projection {
        projection::project(segments, self.config.format)
    }

    pub fn hierarchy(&self, segments: &[Segment]) -> Hierarchy {
        HierarchyBuilder::build(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::core::normalizer::{StyledUnit, TextRun};
    use crate::error::SegmentError;
    use crate::SegmentKind;

    fn kinds(segments: &[Segment]) -> Vec<SegmentKind> {
        segments.iter().map(Segment::kind).collect()
    }

    #[test]
    fn test_plain_text_keeps_lines_apart() {
        let segmenter = Segmenter::default();
        let segments = segmenter
            .segment(&RawInput::Plain("first line\nsecond line\n\nthird".into()))
            .unwrap();
        let texts: Vec<_> = segments.iter().map(Segment::text).collect();
        assert_eq!(texts, vec!["first line", "second line", "third"]);
    }

    #[test]
    fn test_structured_merges_body() {
        let segmenter = Segmenter::default();
        let segments = segmenter
            .segment(&RawInput::Structured(vec![
                StyledUnit::new("Report", Some("Heading 1")),
                StyledUnit::new("a", Some("Normal")),
                StyledUnit::new("b", Some("Normal")),
            ]))
            .unwrap();
        assert_eq!(kinds(&segments), vec![SegmentKind::Title, SegmentKind::Paragraph]);
        assert_eq!(segments[1].text(), "a b");
    }

    #[test]
    fn test_geometry_uses_configured_bands() {
        let mut config = SegmenterConfig::default();
        config.font_bands.title_min = 20.0;
        let segmenter = Segmenter::new(config);
        let segments = segmenter
            .segment(&RawInput::Geometry(vec![
                TextRun::new("A", 18.0),
                TextRun::new("b", 10.0),
            ]))
            .unwrap();
        assert_eq!(kinds(&segments), vec![SegmentKind::Subtitle, SegmentKind::Paragraph]);
    }

    #[test]
    fn test_malformed_style_returns_no_partial_output() {
        let segmenter = Segmenter::default();
        let result = segmenter.segment(&RawInput::Structured(vec![
            StyledUnit::new("Fine", Some("Heading 1")),
            StyledUnit::new("text", None),
            StyledUnit::new("Broken", Some("Heading")),
        ]));
        assert!(matches!(result, Err(SegmentError::MalformedHeadingSignal { .. })));
    }

    #[test]
    fn test_project_uses_configured_format() {
        let config = SegmenterConfig {
            format: OutputFormat::Hierarchical,
            ..SegmenterConfig::default()
        };
        let segmenter = Segmenter::new(config);
        let segments = segmenter.segment(&RawInput::Markup("# T\nbody".into())).unwrap();
        match segmenter.project(&segments) {
            Projection::Hierarchical(titles) => {
                assert_eq!(titles.len(), 1);
                assert_eq!(titles[0].paragraphs, vec!["body".to_string()]);
            }
            other => panic!("unexpected projection {:?}", other),
        }
    }
}
