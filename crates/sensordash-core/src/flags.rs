use polars::prelude::*;

use crate::classify::{TEMPERATURE_STATUS, VIBRATION_WARNING};
use crate::error::Result;
use crate::types::{TemperatureStatus, WarningSummary};

/// Rows whose vibration exceeded their threshold, in original order.
pub fn vibration_flags(df: &DataFrame) -> Result<DataFrame> {
    let mask = df.column(VIBRATION_WARNING)?.bool()?;
    Ok(df.filter(mask)?)
}

/// Rows whose temperature status is Orange or Red, in original order.
pub fn temperature_flags(df: &DataFrame) -> Result<DataFrame> {
    let mask = temperature_warning_mask(df)?;
    let mask = mask.bool()?;
    Ok(df.filter(mask)?)
}

/// Warning counts over a classified frame. Computed from the same masks the
/// flag subsets use, so a count always equals the matching subset's height.
pub fn summarize(df: &DataFrame) -> Result<WarningSummary> {
    let vibration = df.column(VIBRATION_WARNING)?.bool()?;
    let vibration_warnings = vibration.sum().unwrap_or(0) as usize;

    let temperature_mask = temperature_warning_mask(df)?;
    let temperature_warnings = temperature_mask.bool()?.sum().unwrap_or(0) as usize;

    Ok(WarningSummary {
        vibration_warnings,
        temperature_warnings,
    })
}

fn temperature_warning_mask(df: &DataFrame) -> Result<Series> {
    let status = df.column(TEMPERATURE_STATUS)?.str()?;
    let mask: Vec<bool> = status
        .iter()
        .map(|value| {
            value
                .and_then(|cell| TemperatureStatus::try_from(cell).ok())
                .map(|status| status.is_warning())
                .unwrap_or(false)
        })
        .collect();
    Ok(Series::new(TEMPERATURE_STATUS.into(), mask))
}
