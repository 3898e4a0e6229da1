use polars::prelude::*;

use sensordash_parser::model::{
    SENSOR_DESCRIPTION, SENSOR_ID, TEMPERATURE, VIBRATION, VIBRATION_THRESHOLD,
};

use crate::error::Result;
use crate::types::TemperatureStatus;

/// Derived column names appended by classification.
pub const SENSOR_LABEL: &str = "sensor_label";
pub const VIBRATION_WARNING: &str = "vibration_warning";
pub const TEMPERATURE_STATUS: &str = "temperature_status";

/// Appends the derived columns to a readings frame: the display label, the
/// vibration threshold check, and the temperature risk status. A comparison
/// against a null operand is false (vibration) or Green (temperature).
pub fn classify_readings(df: &DataFrame) -> Result<DataFrame> {
    let len = df.height();

    let sensor_id = df.column(SENSOR_ID)?.str()?;
    let description = df.column(SENSOR_DESCRIPTION)?.str()?;
    let vibration = df.column(VIBRATION)?.f64()?;
    let threshold = df.column(VIBRATION_THRESHOLD)?.f64()?;
    let temperature = df.column(TEMPERATURE)?.f64()?;

    let mut labels: Vec<String> = Vec::with_capacity(len);
    let mut warnings: Vec<bool> = Vec::with_capacity(len);
    let mut statuses: Vec<&'static str> = Vec::with_capacity(len);

    for idx in 0..len {
        labels.push(sensor_label(sensor_id.get(idx), description.get(idx)));

        let warning = match (vibration.get(idx), threshold.get(idx)) {
            (Some(value), Some(limit)) => value > limit,
            _ => false,
        };
        warnings.push(warning);

        statuses.push(TemperatureStatus::from_reading(temperature.get(idx)).as_str());
    }

    let mut output = df.clone();
    let mut columns = [
        Series::new(SENSOR_LABEL.into(), labels).into(),
        Series::new(VIBRATION_WARNING.into(), warnings).into(),
        Series::new(TEMPERATURE_STATUS.into(), statuses).into(),
    ];
    output.hstack_mut(columns.as_mut_slice())?;

    Ok(output)
}

/// Display label for a reading, recomputed from its source fields. Null parts
/// render empty rather than carrying a sentinel into the label.
pub fn sensor_label(id: Option<&str>, description: Option<&str>) -> String {
    format!("{} - {}", id.unwrap_or_default(), description.unwrap_or_default())
}
