//! Writers that encode a [`Projection`] into bytes.

use crate::core::projection::Projection;
use crate::error::{Result, SegmentError};
use std::io::Write;

/// Header row of flat CSV output.
pub const CSV_HEADER: [&str; 3] = ["Segment Type", "Importance", "Text"];

/// Writer is responsible for encoding a projected document.
pub trait SegmentWriter: Send + Sync {
    /// File extension of the produced output, without the dot.
    fn extension(&self) -> &'static str;

    fn write(&self, projection: &Projection, out: &mut dyn Write) -> Result<()>;
}

/// Tabular output: one row per flat record.
pub struct CsvWriter;

impl SegmentWriter for CsvWriter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn write(&self, projection: &Projection, out: &mut dyn Write) -> Result<()> {
        let Projection::Flat(records) = projection else {
            return Err(SegmentError::unsupported_shape(
                "flat projection",
                format!("{} projection", projection.format()),
            ));
        };

        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(CSV_HEADER)?;
        for record in records {
            // Debug keeps the decimal point on whole numbers ("2.0").
            let importance = format!("{:?}", record.importance);
            writer.write_record([record.kind.as_str(), importance.as_str(), record.text.as_str()])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON, for either projection.
pub struct JsonWriter;

impl SegmentWriter for JsonWriter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, projection: &Projection, out: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *out, projection)?;
        writeln!(out)?;
        Ok(())
    }
}
