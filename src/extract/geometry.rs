//! Word lists produced by a font-size-aware PDF extractor.
//!
//! The file is a JSON array of `{ "text": ..., "height": ... }` objects in
//! reading order.

use crate::core::normalizer::{InputKind, RawInput, TextRun};
use crate::error::Result;
use crate::extract::Extractor;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub struct GeometryExtractor;

impl GeometryExtractor {
    pub fn read_runs<R: Read>(&self, reader: R) -> Result<RawInput> {
        let runs: Vec<TextRun> = serde_json::from_reader(reader)?;
        Ok(RawInput::Geometry(runs))
    }
}

impl Extractor for GeometryExtractor {
    fn kind(&self) -> InputKind {
        InputKind::Geometry
    }

    fn extract(&self, path: &Path) -> Result<RawInput> {
        let file = File::open(path)?;
        self.read_runs(BufReader::new(file))
    }
}
