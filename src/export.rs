use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;

use crate::cards::summary_cards_for_date;
use crate::models::{ExportPayload, ExportPeriods, Period, RiskLevel, StationRecord};
use crate::risk::{filter_by_classification, snapshot_for_date};
use crate::series;

pub const APP_NAME: &str = "alab-ph";

pub struct ExportOptions {
    pub heat_index_period: Period,
    pub forecast_error_period: Period,
    pub classification: Option<RiskLevel>,
}

pub fn build_payload(
    catalog: &[StationRecord],
    date: &str,
    options: &ExportOptions,
) -> ExportPayload {
    let stations = filter_by_classification(snapshot_for_date(catalog, date), options.classification);
    let heat_index = series::average_heat_index_series(date);
    let forecast_error = series::forecast_error_series(date);

    ExportPayload {
        date: date.to_string(),
        period: ExportPeriods {
            heat_index_period: options.heat_index_period,
            forecast_error_period: options.forecast_error_period,
        },
        cards: summary_cards_for_date(catalog, date),
        stations,
        average_heat_index_data: series::select_period(&heat_index, options.heat_index_period, date),
        mean_forecast_error_data: series::select_period(
            &forecast_error,
            options.forecast_error_period,
            date,
        ),
    }
}

/// `alab-ph-data-<date>.json`, with anything unsafe in a file name replaced by `-`.
pub fn export_file_name(date: &str) -> String {
    let date: String = date
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{APP_NAME}-data-{date}.json")
}

pub fn write_export(payload: &ExportPayload, out_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = out_dir.join(export_file_name(&payload.date));
    let json = serde_json::to_string_pretty(payload).context("failed to serialize export")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write export to {}", path.display()))?;
    info!(
        "exported {} stations and {} cards to {}",
        payload.stations.len(),
        payload.cards.len(),
        path.display()
    );
    Ok(path)
}
