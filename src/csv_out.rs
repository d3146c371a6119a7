//! CSV persistence for extracted records.
//!
//! Dictionary-style writer semantics: the header row comes from the union
//! builder and fields a record does not carry render as empty cells. No
//! output file is written when zero records were produced.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::record::Record;

/// Append a `.csv` extension (case-insensitively checked) when missing.
#[must_use]
pub fn ensure_csv_extension(path: PathBuf) -> PathBuf {
    let has_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if has_csv {
        path
    } else {
        let mut name = path.file_name().map(std::ffi::OsString::from).unwrap_or_default();
        name.push(".csv");
        path.with_file_name(name)
    }
}

/// Write records as UTF-8 CSV: one header row, one data row per record.
pub fn write_records(path: &Path, headers: &[String], records: &[Record]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(headers)?;
    for record in records {
        let row: Vec<&str> = headers
            .iter()
            .map(|header| record.get(header).unwrap_or(""))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}
