use std::collections::HashMap;

use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::Serialize;

use sensordash_parser::model::{SENSOR_ID, TEMPERATURE, TIMESTAMP, VIBRATION, VIBRATION_THRESHOLD};

use crate::classify::SENSOR_LABEL;
use crate::error::Result;
use crate::types::{
    BAND_CEILING_HEADROOM_C, CAUTION_FLOOR_C, CRITICAL_FLOOR_C, PLACEHOLDER_SENSOR_ID,
};

/// Display units carried by the series, matching the dashboard's chart legends.
pub const VIBRATION_UNIT: &str = "mm/s";
pub const TEMPERATURE_UNIT: &str = "°C";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// One sensor's vibration readings over time, paired with its row-specific
/// threshold series over the same timestamps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VibrationTrend {
    pub sensor_id: String,
    pub label: String,
    pub unit: &'static str,
    pub readings: Vec<TrendPoint>,
    pub thresholds: Vec<TrendPoint>,
}

/// Fixed risk-band edges drawn behind a temperature series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBands {
    pub caution_floor: f64,
    pub critical_floor: f64,
    pub ceiling: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureTrend {
    pub sensor_id: String,
    pub label: String,
    pub unit: &'static str,
    pub readings: Vec<TrendPoint>,
    pub bands: RiskBands,
}

/// Per-sensor vibration series from a classified frame. Rows with a null
/// vibration, threshold, or timestamp are dropped; a group with no surviving
/// rows produces no series. Group order is first appearance in the frame.
pub fn vibration_trends(df: &DataFrame) -> Result<Vec<VibrationTrend>> {
    let sensor_id = df.column(SENSOR_ID)?.str()?;
    let label = df.column(SENSOR_LABEL)?.str()?;
    let vibration = df.column(VIBRATION)?.f64()?;
    let threshold = df.column(VIBRATION_THRESHOLD)?.f64()?;
    let timestamp = df.column(TIMESTAMP)?.datetime()?;

    let order = grouping_order(sensor_id);
    let mut groups: HashMap<&str, VibrationTrend> = HashMap::new();

    for idx in 0..df.height() {
        let Some(id) = sensor_id.get(idx) else {
            continue;
        };
        if id == PLACEHOLDER_SENSOR_ID {
            continue;
        }
        let (Some(value), Some(limit), Some(micros)) = (
            vibration.get(idx),
            threshold.get(idx),
            timestamp.get(idx),
        ) else {
            continue;
        };
        let Some(ts) = micros_to_naive(micros) else {
            continue;
        };

        let entry = groups.entry(id).or_insert_with(|| VibrationTrend {
            sensor_id: id.to_string(),
            label: label.get(idx).unwrap_or_default().to_string(),
            unit: VIBRATION_UNIT,
            readings: Vec::new(),
            thresholds: Vec::new(),
        });
        entry.readings.push(TrendPoint {
            timestamp: ts,
            value,
        });
        entry.thresholds.push(TrendPoint {
            timestamp: ts,
            value: limit,
        });
    }

    Ok(order
        .into_iter()
        .filter_map(|id| groups.remove(id))
        .collect())
}

/// Per-sensor temperature series from a classified frame. Rows with a null
/// temperature or timestamp are dropped; the top band's ceiling sits a fixed
/// headroom above the group's maximum reading.
pub fn temperature_trends(df: &DataFrame) -> Result<Vec<TemperatureTrend>> {
    struct Group {
        label: String,
        readings: Vec<TrendPoint>,
    }

    let sensor_id = df.column(SENSOR_ID)?.str()?;
    let label = df.column(SENSOR_LABEL)?.str()?;
    let temperature = df.column(TEMPERATURE)?.f64()?;
    let timestamp = df.column(TIMESTAMP)?.datetime()?;

    let order = grouping_order(sensor_id);
    let mut groups: HashMap<&str, Group> = HashMap::new();

    for idx in 0..df.height() {
        let Some(id) = sensor_id.get(idx) else {
            continue;
        };
        if id == PLACEHOLDER_SENSOR_ID {
            continue;
        }
        let (Some(value), Some(micros)) = (temperature.get(idx), timestamp.get(idx)) else {
            continue;
        };
        let Some(ts) = micros_to_naive(micros) else {
            continue;
        };

        let entry = groups.entry(id).or_insert_with(|| Group {
            label: label.get(idx).unwrap_or_default().to_string(),
            readings: Vec::new(),
        });
        entry.readings.push(TrendPoint {
            timestamp: ts,
            value,
        });
    }

    Ok(order
        .into_iter()
        .filter_map(|id| {
            let group = groups.remove(id)?;
            let max = group
                .readings
                .iter()
                .map(|point| point.value)
                .fold(f64::MIN, f64::max);
            Some(TemperatureTrend {
                sensor_id: id.to_string(),
                label: group.label,
                unit: TEMPERATURE_UNIT,
                readings: group.readings,
                bands: RiskBands {
                    caution_floor: CAUTION_FLOOR_C,
                    critical_floor: CRITICAL_FLOOR_C,
                    ceiling: max + BAND_CEILING_HEADROOM_C,
                },
            })
        })
        .collect())
}

/// Distinct plottable sensor ids in order of first appearance. Null ids and
/// the placeholder id never form a group.
fn grouping_order(sensor_id: &StringChunked) -> Vec<&str> {
    let mut order: Vec<&str> = Vec::new();
    for idx in 0..sensor_id.len() {
        let Some(id) = sensor_id.get(idx) else {
            continue;
        };
        if id == PLACEHOLDER_SENSOR_ID {
            continue;
        }
        if !order.iter().any(|seen| *seen == id) {
            order.push(id);
        }
    }
    order
}

fn micros_to_naive(micros: i64) -> Option<NaiveDateTime> {
    chrono::DateTime::from_timestamp_micros(micros).map(|dt| dt.naive_utc())
}
