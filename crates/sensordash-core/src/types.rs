use std::fmt;

use serde::{Deserialize, Serialize};

/// Id the dashboard export uses for rows that do not belong to a physical
/// sensor. Such rows are counted and flagged like any other but never plotted.
pub const PLACEHOLDER_SENSOR_ID: &str = "17ND";

/// Temperature at which a reading leaves the safe band.
pub const CAUTION_FLOOR_C: f64 = 40.0;
/// Temperature above which a reading is critical.
pub const CRITICAL_FLOOR_C: f64 = 50.0;
/// Headroom drawn above a group's maximum temperature in the top risk band.
pub const BAND_CEILING_HEADROOM_C: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureStatus {
    Green,
    Orange,
    Red,
}

impl TemperatureStatus {
    /// Classifies a temperature reading. A null reading is Green.
    pub fn from_reading(temperature: Option<f64>) -> Self {
        match temperature {
            Some(value) if value > CRITICAL_FLOOR_C => TemperatureStatus::Red,
            Some(value) if value >= CAUTION_FLOOR_C => TemperatureStatus::Orange,
            _ => TemperatureStatus::Green,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureStatus::Green => "Green",
            TemperatureStatus::Orange => "Orange",
            TemperatureStatus::Red => "Red",
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, TemperatureStatus::Orange | TemperatureStatus::Red)
    }
}

impl fmt::Display for TemperatureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureStatus {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "green" => Ok(TemperatureStatus::Green),
            "orange" => Ok(TemperatureStatus::Orange),
            "red" => Ok(TemperatureStatus::Red),
            other => Err(format!("unknown temperature status '{other}'")),
        }
    }
}

/// Aggregate counts shown alongside the derived table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WarningSummary {
    pub vibration_warnings: usize,
    pub temperature_warnings: usize,
}
