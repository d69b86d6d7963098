use chrono::{DateTime, Datelike, NaiveDate};
use log::debug;

use crate::models::{RiskLevel, StationRecord, StationSnapshot};

pub const EXTREME_DANGER_THRESHOLD: i32 = 52;
pub const DANGER_THRESHOLD: i32 = 42;
pub const EXTREME_CAUTION_THRESHOLD: i32 = 33;
pub const CAUTION_THRESHOLD: i32 = 27;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parses ISO dates, RFC 3339 timestamps and US-style `MM/DD/YYYY` dates.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

/// The calendar day before `date_str`, as `YYYY-MM-DD`. Unparseable input is
/// returned unchanged so the previous day degrades to the same baseline.
pub fn previous_date_str(date_str: &str) -> String {
    parse_date(date_str)
        .and_then(|date| date.pred_opt())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| date_str.to_string())
}

/// Rounds `.5` toward positive infinity.
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Synthetic forecast deviation for a date, in whole degrees (about -5..=5).
pub fn compute_date_offset(date_str: &str) -> i32 {
    match parse_date(date_str) {
        Some(date) => round_half_up((date.day() as f64 - 15.0) / 3.0),
        None => {
            debug!("unparseable date {date_str:?}, using offset 0");
            0
        }
    }
}

pub fn classify_risk(heat_index: i32) -> RiskLevel {
    match heat_index {
        hi if hi >= EXTREME_DANGER_THRESHOLD => RiskLevel::ExtremeDanger,
        hi if hi >= DANGER_THRESHOLD => RiskLevel::Danger,
        hi if hi >= EXTREME_CAUTION_THRESHOLD => RiskLevel::ExtremeCaution,
        hi if hi >= CAUTION_THRESHOLD => RiskLevel::Caution,
        // no band below Caution
        _ => RiskLevel::Caution,
    }
}

/// Cycles -1, 0, +1 through the catalog so neighbouring stations don't move in lockstep.
pub fn station_adjustment(index: usize) -> i32 {
    (index % 3) as i32 - 1
}

pub fn trend_label(delta: i32, static_trend: Option<&str>) -> String {
    match delta {
        0 => static_trend.unwrap_or("-").to_string(),
        d if d > 0 => format!("+{d}°C"),
        d => format!("{d}°C"),
    }
}

/// Every catalog station's reading for `date_str`, in catalog order.
pub fn snapshot_for_date(catalog: &[StationRecord], date_str: &str) -> Vec<StationSnapshot> {
    let offset = compute_date_offset(date_str);

    catalog
        .iter()
        .enumerate()
        .map(|(index, station)| {
            let delta = offset + station_adjustment(index);
            let heat_index = station.base_heat_index + delta;
            StationSnapshot {
                name: station.name.clone(),
                heat_index,
                risk_level: classify_risk(heat_index),
                trend: trend_label(delta, station.static_trend.as_deref()),
            }
        })
        .collect()
}

pub fn filter_by_classification(
    mut snapshots: Vec<StationSnapshot>,
    classification: Option<RiskLevel>,
) -> Vec<StationSnapshot> {
    if let Some(level) = classification {
        snapshots.retain(|snapshot| snapshot.risk_level == level);
    }
    snapshots
}

/// Station counts per risk level, least severe first, zero counts included.
pub fn risk_distribution(snapshots: &[StationSnapshot]) -> Vec<(RiskLevel, usize)> {
    RiskLevel::ALL
        .into_iter()
        .map(|level| {
            let count = snapshots
                .iter()
                .filter(|snapshot| snapshot.risk_level == level)
                .count();
            (level, count)
        })
        .collect()
}
