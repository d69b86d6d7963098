use std::fmt::Write;

use crate::cards;
use crate::models::{RiskLevel, StationRecord};
use crate::risk;

pub fn build_report(
    catalog: &[StationRecord],
    date: &str,
    classification: Option<RiskLevel>,
) -> String {
    let snapshots = risk::snapshot_for_date(catalog, date);
    let distribution = risk::risk_distribution(&snapshots);
    let cards = cards::summary_cards_for_date(catalog, date);
    let stations = risk::filter_by_classification(snapshots, classification);

    let mut output = String::new();

    let _ = writeln!(output, "# Heat Index Monitoring Report");
    let _ = writeln!(
        output,
        "Forecast for {} (offset {:+}°C from baseline)",
        date,
        risk::compute_date_offset(date)
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");

    for card in cards.iter() {
        let _ = writeln!(
            output,
            "- {}: **{}** ({})",
            card.title, card.value, card.subtext
        );
    }

    let _ = writeln!(output);
    match classification {
        Some(level) => {
            let _ = writeln!(output, "## Stations Overview ({level})");
        }
        None => {
            let _ = writeln!(output, "## Stations Overview");
        }
    }

    if stations.is_empty() {
        let _ = writeln!(output, "No stations match this classification.");
    } else {
        let _ = writeln!(output, "| Station | Heat Index | Risk Level | Trend |");
        let _ = writeln!(output, "|---|---|---|---|");
        for station in stations.iter() {
            let _ = writeln!(
                output,
                "| {} | {}°C | {} | {} |",
                station.name, station.heat_index, station.risk_level, station.trend
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Synoptic Stations");

    for (level, count) in distribution.iter() {
        let _ = writeln!(output, "- {level}: {count} stations");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::default_catalog;

    #[test]
    fn report_lists_cards_stations_and_distribution() {
        let report = build_report(&default_catalog(), "2025-05-27", None);
        assert!(report.starts_with("# Heat Index Monitoring Report"));
        assert!(report.contains("Forecast for 2025-05-27 (offset +4°C from baseline)"));
        assert!(report.contains("- Highest Forecasted Heat Index: **50°C** (Clark Airport, Pampanga)"));
        assert!(report.contains("| Ambulong, Batangas | 43°C | Danger | +3°C |"));
        assert!(report.contains("- Danger: 23 stations"));
        assert!(report.contains("- Caution: 0 stations"));
    }

    #[test]
    fn classification_narrows_station_table() {
        let report = build_report(&default_catalog(), "2025-05-17", Some(RiskLevel::Danger));
        assert!(report.contains("## Stations Overview (Danger)"));
        assert!(report.contains("| Clark Airport, Pampanga | 47°C | Danger |"));
        assert!(!report.contains("| Basco, Batanes |"));
    }

    #[test]
    fn empty_selection_is_reported() {
        let report = build_report(
            &default_catalog(),
            "2025-05-17",
            Some(RiskLevel::ExtremeDanger),
        );
        assert!(report.contains("No stations match this classification."));
    }
}
