use crate::config::OutputFormat;
use crate::core::normalizer::InputKind;
use crate::core::projection::{self, Projection};
use crate::core::segmenter::Segmenter;
use crate::core::writer::{CsvWriter, JsonWriter, SegmentWriter};
use crate::extract;
use crate::utils::naming::{self, DirectoryEnsurer, FsDirectoryEnsurer, NameGenerator, TimestampNameGenerator};
use crate::SegmentKind;
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Summary of one processed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessReport {
    pub source: PathBuf,
    pub output: Option<PathBuf>,
    pub segments: usize,
    pub titles: usize,
    /// Segments left out of a hierarchical projection.
    pub dropped: usize,
    pub error: Option<String>,
}

impl ProcessReport {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct DocumentProcessor {
    segmenter: Segmenter,
    writer: Box<dyn SegmentWriter>,
    names: Box<dyn NameGenerator>,
    dirs: Box<dyn DirectoryEnsurer>,
}

impl DocumentProcessor {
    /// Processor with the writer that fits the configured format: CSV for
    /// flat output, JSON for the hierarchy.
    pub fn new(segmenter: Segmenter) -> Self {
        let writer: Box<dyn SegmentWriter> = match segmenter.config().format {
            OutputFormat::Flat => Box::new(CsvWriter),
            OutputFormat::Hierarchical => Box::new(JsonWriter),
        };
        Self {
            segmenter,
            writer,
            names: Box::new(TimestampNameGenerator::new()),
            dirs: Box::new(FsDirectoryEnsurer),
        }
    }

    pub fn with_writer(mut self, writer: Box<dyn SegmentWriter>) -> Self {
        self.writer = writer;
        self
    }

    pub fn with_name_generator(mut self, names: Box<dyn NameGenerator>) -> Self {
        self.names = names;
        self
    }

    pub fn with_directory_ensurer(mut self, dirs: Box<dyn DirectoryEnsurer>) -> Self {
        self.dirs = dirs;
        self
    }

    /// Process a file, or every supported file of a directory.
    pub fn process_path<P: AsRef<Path>>(&self, input: P, output_dir: P) -> Result<Vec<ProcessReport>> {
        let input = input.as_ref();
        if input.is_dir() {
            self.process_directory(input, output_dir.as_ref())
        } else {
            Ok(vec![self.process_file(input, output_dir.as_ref())?])
        }
    }

    /// Segment one file and write its projection into `output_dir`.
    pub fn process_file<P1: AsRef<Path>, P2: AsRef<Path>>(&self, source: P1, output_dir: P2) -> Result<ProcessReport> {
        let source = source.as_ref();
        let output_dir = output_dir.as_ref();
        let output = naming::output_path(self.names.as_ref(), output_dir, source, self.writer.extension());
        self.process_into(source, output_dir, output)
    }

    fn process_into(&self, source: &Path, output_dir: &Path, output: PathBuf) -> Result<ProcessReport> {
        info!("Processing file: {}", source.display());

        let raw = extract::extract_path(source)
            .with_context(|| format!("Failed to extract {}", source.display()))?;
        let segments = self
            .segmenter
            .segment(&raw)
            .with_context(|| format!("Failed to segment {}", source.display()))?;

        let titles = segments.iter().filter(|s| s.kind() == SegmentKind::Title).count();
        let (projection, dropped) = match self.segmenter.config().format {
            OutputFormat::Flat => (projection::flat(&segments), 0),
            OutputFormat::Hierarchical => {
                let hierarchy = self.segmenter.hierarchy(&segments);
                let dropped = hierarchy.dropped.len();
                (Projection::from(hierarchy), dropped)
            }
        };

        self.dirs
            .ensure(output_dir)
            .with_context(|| format!("Failed to prepare output directory {}", output_dir.display()))?;

        let file = File::create(&output)
            .with_context(|| format!("Failed to create {}", output.display()))?;
        let mut out = BufWriter::new(file);
        self.writer
            .write(&projection, &mut out)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        out.flush()?;

        info!(
            "Segments have been saved in {} ({} segments, {} titles)",
            output.display(),
            segments.len(),
            titles
        );
        if dropped > 0 {
            warn!("{} segment(s) of {} are not in the hierarchy", dropped, source.display());
        }

        Ok(ProcessReport {
            source: source.to_path_buf(),
            output: Some(output),
            segments: segments.len(),
            titles,
            dropped,
            error: None,
        })
    }

    /// Process every supported file of `input_dir` in parallel.
    ///
    /// A failing file is logged and reported; it never stops the batch.
    pub fn process_directory<P1: AsRef<Path>, P2: AsRef<Path>>(&self, input_dir: P1, output_dir: P2) -> Result<Vec<ProcessReport>> {
        let input_dir = input_dir.as_ref();
        let output_dir = output_dir.as_ref();
        info!("Starting to process documents from: {}", input_dir.display());

        let entries = fs::read_dir(input_dir)
            .with_context(|| format!("Failed to read input directory {}", input_dir.display()))?;

        let mut sources = Vec::new();
        for entry in entries {
            let path = entry.context("Failed to read directory entry")?.path();
            if !path.is_file() {
                debug!("Skipping non-file entry: {}", path.display());
            } else if InputKind::from_path(&path).is_none() {
                debug!("Skipping unsupported file: {}", path.display());
            } else {
                sources.push(path);
            }
        }
        sources.sort();

        // Output names are claimed up front; two sources never share one.
        let mut claimed = HashSet::new();
        let jobs: Vec<(PathBuf, PathBuf)> = sources
            .into_iter()
            .map(|source| {
                let output = naming::output_path(self.names.as_ref(), output_dir, &source, self.writer.extension());
                let output = naming::claim_unique(output, &mut claimed);
                (source, output)
            })
            .collect();

        let reports: Vec<ProcessReport> = jobs
            .into_par_iter()
            .map(|(source, output)| match self.process_into(&source, output_dir, output) {
                Ok(report) => report,
                Err(e) => {
                    error!("Failed to process {}: {:#}", source.display(), e);
                    ProcessReport {
                        source,
                        output: None,
                        segments: 0,
                        titles: 0,
                        dropped: 0,
                        error: Some(format!("{:#}", e)),
                    }
                }
            })
            .collect();

        let failed = reports.iter().filter(|r| !r.is_ok()).count();
        info!(
            "Completed processing {} documents ({} failed)",
            reports.len(),
            failed
        );
        Ok(reports)
    }
}
