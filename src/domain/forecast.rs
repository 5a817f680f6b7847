use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// Forecast horizon selectable by the dashboard
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ForecastRange {
    /// 60 minutes in 10 minute steps
    NextHour,
    /// 7 fixed times of day
    NextDay,
    /// Monday through Sunday
    NextWeek,
    /// 4 weekly averages
    NextMonth,
}

impl ForecastRange {
    /// Parse a range key; `None` for keys the builder does not know.
    pub fn parse(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    /// Number of points every forecast of this range contains
    pub fn point_count(&self) -> usize {
        match self {
            Self::NextHour | Self::NextDay | Self::NextWeek => 7,
            Self::NextMonth => 4,
        }
    }
}

/// One chronological sample of a forecast curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    pub predicted: f64,
}

impl ForecastPoint {
    pub fn new(time: impl Into<String>, actual: f64, predicted: f64) -> Self {
        Self {
            time: time.into(),
            actual: Some(actual),
            predicted,
        }
    }

    /// Point carrying only a prediction (aggregated ranges)
    pub fn predicted_only(time: impl Into<String>, predicted: f64) -> Self {
        Self {
            time: time.into(),
            actual: None,
            predicted,
        }
    }
}

/// Monthly energy volume in million units (MU)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub time: String,
    pub predicted: f64,
}

/// Citizen-facing snapshot of the grid right now
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub current_mw: f64,
    pub capacity_mw: f64,
    pub load_pct: f64,
    pub is_peak: bool,
    pub is_critical: bool,
    pub renewable_pct: f64,
    pub weather: StatusWeather,
    pub tip: String,
    pub co2_saved_tons: f64,
    /// Local wall-clock time, `HH:MM`
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusWeather {
    pub temp: f64,
    pub humidity: f64,
}
