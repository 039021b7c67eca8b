//! Title → subtitle → paragraph tree built from the flat segment sequence.
//!
//! The tree cannot hold a subtitle without a title, or a paragraph without
//! any open heading. Such nodes are dropped from the tree and listed in
//! [`Hierarchy::dropped`]; the flat sequence still contains them.

use crate::{Segment, SegmentKind};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TitleNode {
    pub title: String,
    /// Paragraphs between the title and its first subtitle.
    pub paragraphs: Vec<String>,
    pub subtitles: Vec<SubtitleNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SubtitleNode {
    pub subtitle: String,
    pub paragraphs: Vec<String>,
}

/// A segment left out of the tree because no parent was open.
#[derive(Debug, Clone, PartialEq)]
pub struct UnattachedNode {
    /// Position in the flat sequence.
    pub index: usize,
    pub kind: SegmentKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Hierarchy {
    pub titles: Vec<TitleNode>,
    pub dropped: Vec<UnattachedNode>,
}

pub struct HierarchyBuilder;

impl HierarchyBuilder {
    pub fn build(segments: &[Segment]) -> Hierarchy {
        let mut titles: Vec<TitleNode> = Vec::new();
        let mut dropped = Vec::new();
        // Cursors into `titles` / the current title's `subtitles`.
        let mut current_title: Option<usize> = None;
        let mut current_subtitle: Option<usize> = None;

        for (index, segment) in segments.iter().enumerate() {
            let text = segment.text().to_string();
            match segment.kind() {
                SegmentKind::Title => {
                    titles.push(TitleNode {
                        title: text,
                        ..TitleNode::default()
                    });
                    current_title = Some(titles.len() - 1);
                    current_subtitle = None;
                }
                SegmentKind::Subtitle => match current_title {
                    Some(t) => {
                        let subtitles = &mut titles[t].subtitles;
                        subtitles.push(SubtitleNode {
                            subtitle: text,
                            paragraphs: Vec::new(),
                        });
                        current_subtitle = Some(subtitles.len() - 1);
                    }
                    None => dropped.push(Self::unattached(index, segment)),
                },
                SegmentKind::Paragraph => match (current_title, current_subtitle) {
                    (Some(t), Some(s)) => titles[t].subtitles[s].paragraphs.push(text),
                    (Some(t), None) => titles[t].paragraphs.push(text),
                    (None, _) => dropped.push(Self::unattached(index, segment)),
                },
            }
        }

        if !dropped.is_empty() {
            log::warn!(
                "{} segment(s) before the first title have no parent and are left out of the hierarchy",
                dropped.len()
            );
        }

        Hierarchy { titles, dropped }
    }

    fn unattached(index: usize, segment: &Segment) -> UnattachedNode {
        log::debug!(
            "Dropping unattachable {} at position {}: {:?}",
            segment.kind(),
            index,
            segment.text()
        );
        UnattachedNode {
            index,
            kind: segment.kind(),
            text: segment.text().to_string(),
        }
    }
}
