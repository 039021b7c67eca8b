use crate::config::OutputFormat;
use crate::core::hierarchy::{Hierarchy, HierarchyBuilder, TitleNode};
use crate::{Segment, SegmentKind};
use serde::Serialize;

/// One row of flat output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRecord {
    pub kind: SegmentKind,
    pub importance: f64,
    pub text: String,
}

impl From<&Segment> for FlatRecord {
    fn from(segment: &Segment) -> Self {
        FlatRecord {
            kind: segment.kind(),
            importance: segment.importance(),
            text: segment.text().to_string(),
        }
    }
}

/// Output shape handed to a writer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    Flat(Vec<FlatRecord>),
    Hierarchical(Vec<TitleNode>),
}

impl Projection {
    pub fn format(&self) -> OutputFormat {
        match self {
            Projection::Flat(_) => OutputFormat::Flat,
            Projection::Hierarchical(_) => OutputFormat::Hierarchical,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Projection::Flat(records) => records.is_empty(),
            Projection::Hierarchical(titles) => titles.is_empty(),
        }
    }
}

/// Tree projection of an already built hierarchy; dropped nodes are left out.
impl From<Hierarchy> for Projection {
    fn from(hierarchy: Hierarchy) -> Self {
        Projection::Hierarchical(hierarchy.titles)
    }
}

pub fn flat(segments: &[Segment]) -> Projection {
    Projection::Flat(segments.iter().map(FlatRecord::from).collect())
}

pub fn hierarchical(segments: &[Segment]) -> Projection {
    Projection::from(HierarchyBuilder::build(segments))
}

pub fn project(segments: &[Segment], format: OutputFormat) -> Projection {
    match format {
        OutputFormat::Flat => flat(segments),
        OutputFormat::Hierarchical => hierarchical(segments),
    }
}
