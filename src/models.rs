use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Static catalog entry for one synoptic station.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub base_heat_index: i32,
    pub static_trend: Option<String>,
}

/// Public-facing heat index severity bands, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RiskLevel {
    #[serde(rename = "Caution")]
    Caution,
    #[serde(rename = "Extreme Caution")]
    ExtremeCaution,
    #[serde(rename = "Danger")]
    Danger,
    #[serde(rename = "Extreme Danger")]
    ExtremeDanger,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 4] = [
        RiskLevel::Caution,
        RiskLevel::ExtremeCaution,
        RiskLevel::Danger,
        RiskLevel::ExtremeDanger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Caution => "Caution",
            RiskLevel::ExtremeCaution => "Extreme Caution",
            RiskLevel::Danger => "Danger",
            RiskLevel::ExtremeDanger => "Extreme Danger",
        }
    }

    /// True for the two bands reported on the danger-count card.
    pub fn is_danger_or_worse(&self) -> bool {
        *self >= RiskLevel::Danger
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    /// Accepts labels in any case, with spaces, dashes or underscores
    /// between words (`Extreme Caution`, `extreme-caution`, `EXTREME_CAUTION`).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase().replace(['-', '_'], " ");
        RiskLevel::ALL
            .into_iter()
            .find(|level| level.as_str().to_lowercase() == normalized)
            .ok_or_else(|| {
                format!(
                    "unknown risk level '{value}' (expected caution, extreme-caution, danger or extreme-danger)"
                )
            })
    }
}

/// A station's computed reading for one evaluated date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSnapshot {
    pub name: String,
    pub heat_index: i32,
    pub risk_level: RiskLevel,
    pub trend: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    pub title: String,
    pub value: String,
    pub subtext: String,
}

/// Chart window: the selected date's week, or the whole month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum Period {
    Week,
    Month,
}

/// One day of the nationwide observed/forecasted heat index chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AverageHeatIndexPoint {
    pub day: String,
    pub observed: f64,
    pub forecasted: f64,
}

/// One day of the absolute forecast error chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastErrorPoint {
    pub day: u32,
    pub t_plus_one: f64,
    pub t_plus_two: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPeriods {
    pub heat_index_period: Period,
    pub forecast_error_period: Period,
}

/// Everything the dashboard shows for one date, as written by `export`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub date: String,
    pub period: ExportPeriods,
    pub cards: Vec<SummaryCard>,
    pub stations: Vec<StationSnapshot>,
    pub average_heat_index_data: Vec<AverageHeatIndexPoint>,
    pub mean_forecast_error_data: Vec<ForecastErrorPoint>,
}
