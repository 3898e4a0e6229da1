use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use polars::prelude::*;

use crate::errors::SchemaError;
use crate::model::{
    Sheet, METADATA_ROWS, SENSOR_DESCRIPTION, SENSOR_DESCRIPTION_COLUMN, SENSOR_ID,
    SENSOR_ID_COLUMN, SPACER_ROWS, TEMPERATURE, TEMPERATURE_COLUMN, TIMESTAMP, TIMESTAMP_COLUMN,
    VIBRATION, VIBRATION_COLUMN, VIBRATION_THRESHOLD, VIBRATION_THRESHOLD_COLUMN,
};

/// Positions of the six required raw columns, resolved once against the
/// header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    sensor_id: usize,
    sensor_description: usize,
    vibration: usize,
    vibration_threshold: usize,
    temperature: usize,
    timestamp: usize,
}

impl ColumnIndices {
    fn resolve(header: &StringRecord) -> Result<Self, SchemaError> {
        Ok(Self {
            sensor_id: find_column(header, SENSOR_ID_COLUMN)?,
            sensor_description: find_column(header, SENSOR_DESCRIPTION_COLUMN)?,
            vibration: find_column(header, VIBRATION_COLUMN)?,
            vibration_threshold: find_column(header, VIBRATION_THRESHOLD_COLUMN)?,
            temperature: find_column(header, TEMPERATURE_COLUMN)?,
            timestamp: find_column(header, TIMESTAMP_COLUMN)?,
        })
    }
}

fn find_column(header: &StringRecord, column: &'static str) -> Result<usize, SchemaError> {
    header
        .iter()
        .position(|cell| cell.trim() == column)
        .ok_or(SchemaError::MissingColumn { column })
}

#[derive(Debug)]
struct ReadingColumns {
    sensor_id: Vec<Option<String>>,
    sensor_description: Vec<Option<String>>,
    vibration: Vec<Option<f64>>,
    vibration_threshold: Vec<Option<f64>>,
    temperature: Vec<Option<f64>>,
    timestamp: Vec<Option<i64>>,
}

impl ReadingColumns {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            sensor_id: Vec::with_capacity(capacity),
            sensor_description: Vec::with_capacity(capacity),
            vibration: Vec::with_capacity(capacity),
            vibration_threshold: Vec::with_capacity(capacity),
            temperature: Vec::with_capacity(capacity),
            timestamp: Vec::with_capacity(capacity),
        }
    }
}

/// Applies the dashboard export's row offsets, resolves the required columns,
/// and materializes a readings frame. Malformed cells become nulls; the only
/// fatal condition is a missing required column.
pub fn parse_readings(sheet: &Sheet) -> Result<DataFrame, SchemaError> {
    let rows = sheet.rows();
    let header = rows
        .get(METADATA_ROWS)
        .ok_or(SchemaError::HeaderNotFound { row: METADATA_ROWS })?;
    let indices = ColumnIndices::resolve(header)?;

    let data_start = METADATA_ROWS + 1 + SPACER_ROWS;
    let data = rows.get(data_start..).unwrap_or(&[]);

    let mut columns = ReadingColumns::with_capacity(data.len());
    for record in data {
        columns
            .sensor_id
            .push(clean_optional(record.get(indices.sensor_id)));
        columns
            .sensor_description
            .push(clean_optional(record.get(indices.sensor_description)));
        columns
            .vibration
            .push(parse_optional_f64(record.get(indices.vibration)));
        columns
            .vibration_threshold
            .push(parse_optional_f64(record.get(indices.vibration_threshold)));
        columns
            .temperature
            .push(parse_optional_f64(record.get(indices.temperature)));
        columns
            .timestamp
            .push(parse_optional_timestamp(record.get(indices.timestamp)));
    }

    build_readings_frame(columns)
}

fn build_readings_frame(columns: ReadingColumns) -> Result<DataFrame, SchemaError> {
    let sensor_id: Vec<Option<&str>> = columns.sensor_id.iter().map(|v| v.as_deref()).collect();
    let description: Vec<Option<&str>> = columns
        .sensor_description
        .iter()
        .map(|v| v.as_deref())
        .collect();

    let timestamp = Series::new(TIMESTAMP.into(), columns.timestamp)
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

    let frame_columns: Vec<Column> = vec![
        Series::new(SENSOR_ID.into(), sensor_id).into(),
        Series::new(SENSOR_DESCRIPTION.into(), description).into(),
        Series::new(VIBRATION.into(), columns.vibration).into(),
        Series::new(VIBRATION_THRESHOLD.into(), columns.vibration_threshold).into(),
        Series::new(TEMPERATURE.into(), columns.temperature).into(),
        timestamp.into(),
    ];

    Ok(DataFrame::new(frame_columns)?)
}

fn clean_optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn parse_optional_f64(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

static TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

fn parse_optional_timestamp(value: Option<&str>) -> Option<i64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().timestamp_micros());
        }
    }

    // Date-only cells map to midnight.
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let dt = date.and_hms_opt(0, 0, 0)?;
        return Some(dt.and_utc().timestamp_micros());
    }

    None
}
