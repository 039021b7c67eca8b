use crate::core::normalizer::{InputKind, RawInput};
use crate::error::{Result, SegmentError};
use crate::extract::{
    docx::DocxExtractor, geometry::GeometryExtractor, pdf::PdfExtractor, text::TextExtractor,
};
use std::path::Path;

/// Reads one source file into already-decoded [`RawInput`].
pub trait Extractor: Send + Sync {
    /// Source kind this extractor produces.
    fn kind(&self) -> InputKind;

    fn extract(&self, path: &Path) -> Result<RawInput>;
}

/// Extractor for `kind`. Geometry input defaults to `*.words.json` runs.
pub fn extractor_for(kind: InputKind) -> Result<Box<dyn Extractor>> {
    Ok(match kind {
        InputKind::Structured => Box::new(DocxExtractor::new()),
        InputKind::Geometry => Box::new(GeometryExtractor),
        InputKind::Markup | InputKind::Plain => Box::new(TextExtractor::new(kind)?),
    })
}

/// Extract a file, choosing the extractor from its name.
pub fn extract_path<P: AsRef<Path>>(path: P) -> Result<RawInput> {
    let path = path.as_ref();
    let kind = InputKind::from_path(path).ok_or_else(|| {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        SegmentError::UnsupportedFormat(format!("{} ({})", path.display(), ext))
    })?;
    log::debug!("Extracting {} as {} input", path.display(), kind);
    let is_pdf = path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        PdfExtractor::new().extract(path)
    } else {
        extractor_for(kind)?.extract(path)
    }
}
