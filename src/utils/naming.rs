//! Output naming and directory bootstrap, supplied by callers of the core.

use chrono::{DateTime, Local};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Chooses the output file name for a processed source.
pub trait NameGenerator: Send + Sync {
    fn output_name(&self, source: &Path, extension: &str) -> String;
}

/// Makes sure an output directory exists before anything is written to it.
pub trait DirectoryEnsurer: Send + Sync {
    fn ensure(&self, dir: &Path) -> io::Result<()>;
}

/// `{stem}_chunk_{YYYY_MM_DD_HH_MM_SS}.{ext}`.
pub struct TimestampNameGenerator {
    clock: fn() -> DateTime<Local>,
}

impl TimestampNameGenerator {
    pub fn new() -> Self {
        Self { clock: Local::now }
    }

    /// Use a fixed clock, for reproducible names.
    pub fn with_clock(clock: fn() -> DateTime<Local>) -> Self {
        Self { clock }
    }
}

impl Default for TimestampNameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl NameGenerator for TimestampNameGenerator {
    fn output_name(&self, source: &Path, extension: &str) -> String {
        let stem = source_stem(source);
        let timestamp = (self.clock)().format("%Y_%m_%d_%H_%M_%S");
        format!("{}_chunk_{}.{}", stem, timestamp, extension)
    }
}

/// File name without its extension; `report.words.json` → `report`.
fn source_stem(source: &Path) -> String {
    const WORDS: &str = ".words";
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let is_json = source
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let cut = stem.len().saturating_sub(WORDS.len());
    let stem = match stem.get(cut..) {
        Some(tail) if is_json && cut > 0 && tail.eq_ignore_ascii_case(WORDS) => stem[..cut].to_string(),
        _ => stem,
    };
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem
    }
}

/// Creates missing directories on the local filesystem.
pub struct FsDirectoryEnsurer;

impl DirectoryEnsurer for FsDirectoryEnsurer {
    fn ensure(&self, dir: &Path) -> io::Result<()> {
        if dir.is_dir() {
            log::info!("Output directory already exists: {}", dir.display());
        } else {
            fs::create_dir_all(dir)?;
            log::info!("Output directory created: {}", dir.display());
        }
        Ok(())
    }
}

/// Full output path for `source` inside `output_dir`.
pub fn output_path(
    names: &dyn NameGenerator,
    output_dir: &Path,
    source: &Path,
    extension: &str,
) -> PathBuf {
    output_dir.join(names.output_name(source, extension))
}

/// Return `path`, or `{stem}_{n}.{ext}` for the first `n` not yet in
/// `claimed`, and record the result as claimed.
pub fn claim_unique(path: PathBuf, claimed: &mut HashSet<PathBuf>) -> PathBuf {
    if claimed.insert(path.clone()) {
        return path;
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path.extension().map(|e| e.to_string_lossy().into_owned());
    let mut n = 2;
    loop {
        let name = match &ext {
            Some(ext) => format!("{}_{}.{}", stem, n, ext),
            None => format!("{}_{}", stem, n),
        };
        let candidate = path.with_file_name(name);
        if claimed.insert(candidate.clone()) {
            log::warn!(
                "Output name {} is already taken; using {}",
                path.display(),
                candidate.display()
            );
            return candidate;
        }
        n += 1;
    }
}
