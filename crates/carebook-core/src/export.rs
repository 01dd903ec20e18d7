//! Export: write records as a pretty-printed JSON array.
//!
//! The output is the dataset format read by [`crate::dataset::load_records`].

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::MedicalRecord;

/// File name used when no export path is configured or given.
pub const DEFAULT_EXPORT_FILE: &str = "medical-records.json";

/// Write `records` to `writer` as a two-space-indented JSON array followed by
/// a newline.
pub fn write_json<W: Write>(records: &[&MedicalRecord], mut writer: W) -> Result<()> {
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| Error::json("export", e))?;
    writeln!(writer).map_err(|e| Error::io("<export>", e))?;
    Ok(())
}

/// Write `records` to the file at `path`, replacing it. Returns the number of
/// records written. Nothing is created when `records` is empty.
pub fn export_to_path(records: &[&MedicalRecord], path: &Path) -> Result<usize> {
    if records.is_empty() {
        return Err(Error::NothingToExport);
    }

    let file = std::fs::File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = std::io::BufWriter::new(file);
    write_json(records, &mut writer)?;
    writer.flush().map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %path.display(), count = records.len(), "records exported");
    Ok(records.len())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
