use csv::{ReaderBuilder, StringRecord};

use crate::errors::SchemaError;

/// Raw column names used by the dashboard export format.
pub const SENSOR_ID_COLUMN: &str = "X8";
pub const SENSOR_DESCRIPTION_COLUMN: &str = "X4";
pub const VIBRATION_COLUMN: &str = "X9";
pub const VIBRATION_THRESHOLD_COLUMN: &str = "X10";
pub const TEMPERATURE_COLUMN: &str = "X27";
pub const TIMESTAMP_COLUMN: &str = "X26";

/// Every raw column a sheet must carry, in resolution order.
pub const REQUIRED_COLUMNS: &[&str] = &[
    SENSOR_ID_COLUMN,
    SENSOR_DESCRIPTION_COLUMN,
    VIBRATION_COLUMN,
    VIBRATION_THRESHOLD_COLUMN,
    TEMPERATURE_COLUMN,
    TIMESTAMP_COLUMN,
];

/// Canonical column names of the readings frame.
pub const SENSOR_ID: &str = "sensor_id";
pub const SENSOR_DESCRIPTION: &str = "sensor_description";
pub const VIBRATION: &str = "vibration";
pub const VIBRATION_THRESHOLD: &str = "vibration_threshold";
pub const TEMPERATURE: &str = "temperature";
pub const TIMESTAMP: &str = "timestamp";

pub const READING_COLUMNS: &[&str] = &[
    SENSOR_ID,
    SENSOR_DESCRIPTION,
    VIBRATION,
    VIBRATION_THRESHOLD,
    TEMPERATURE,
    TIMESTAMP,
];

/// Export metadata rows preceding the header row.
pub const METADATA_ROWS: usize = 4;
/// Spacer rows between the header row and the first data row.
pub const SPACER_ROWS: usize = 1;

/// A decoded sheet: rows of text cells, exactly as the spreadsheet layer
/// hands them over. Row lengths may vary; nothing is interpreted yet.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    rows: Vec<StringRecord>,
}

impl Sheet {
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().collect::<StringRecord>())
            .collect();
        Self { rows }
    }

    /// Reads CSV text as an uninterpreted grid. The header offset is applied
    /// later, during ingestion, so headers are not special here.
    pub fn from_csv(content: &str) -> Result<Self, SchemaError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?);
        }
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
