use polars::prelude::DataFrame;
use tracing::{debug, info};

use sensordash_parser::{parse_readings, Sheet};

use crate::classify::classify_readings;
use crate::error::Result;
use crate::flags::{summarize, temperature_flags, vibration_flags};
use crate::trends::{temperature_trends, vibration_trends, TemperatureTrend, VibrationTrend};
use crate::types::WarningSummary;

/// Everything derived from one uploaded sheet. Owned values only; a new
/// upload produces a fresh `Analysis` and the previous one is simply dropped.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The classified readings frame: canonical columns plus the derived ones.
    pub readings: DataFrame,
    pub summary: WarningSummary,
    pub vibration_flags: DataFrame,
    pub temperature_flags: DataFrame,
    pub vibration_trends: Vec<VibrationTrend>,
    pub temperature_trends: Vec<TemperatureTrend>,
}

/// Runs the whole pipeline over one sheet: parse, classify, count, filter,
/// group. Pure with respect to its input; re-running on the same sheet yields
/// identical output.
pub fn analyze_sheet(sheet: &Sheet) -> Result<Analysis> {
    let readings = parse_readings(sheet)?;
    debug!(rows = readings.height(), "parsed readings sheet");

    let readings = classify_readings(&readings)?;
    let summary = summarize(&readings)?;
    let vibration = vibration_flags(&readings)?;
    let temperature = temperature_flags(&readings)?;
    let vibration_series = vibration_trends(&readings)?;
    let temperature_series = temperature_trends(&readings)?;

    info!(
        vibration_warnings = summary.vibration_warnings,
        temperature_warnings = summary.temperature_warnings,
        vibration_series = vibration_series.len(),
        temperature_series = temperature_series.len(),
        "classified readings"
    );

    Ok(Analysis {
        readings,
        summary,
        vibration_flags: vibration,
        temperature_flags: temperature,
        vibration_trends: vibration_series,
        temperature_trends: temperature_series,
    })
}
