use std::io::Cursor;

use polars::prelude::*;

use crate::error::Result;

/// Suggested download stems for the two flagged-row exports.
pub const VIBRATION_EXPORT_STEM: &str = "vibration_warnings";
pub const TEMPERATURE_EXPORT_STEM: &str = "temperature_warnings";

/// CSV bytes for a flagged-row frame: header row, every canonical and derived
/// column, no index column. Returns `None` when the frame is empty, in which
/// case no export is offered at all.
pub fn flagged_rows_csv(df: &DataFrame) -> Result<Option<Vec<u8>>> {
    if df.height() == 0 {
        return Ok(None);
    }

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let mut clone = df.clone();
        CsvWriter::new(&mut cursor)
            .include_header(true)
            .finish(&mut clone)?;
    }
    Ok(Some(buffer))
}
