use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{info, warn};

mod cards;
mod catalog;
mod export;
mod logger;
mod models;
mod report;
mod risk;
mod series;

use models::{Period, RiskLevel, StationRecord};
use series::DailyPoint;

#[derive(Parser)]
#[command(name = "alab-ph")]
#[command(about = "Heat index monitoring dashboard data for Luzon synoptic stations", long_about = None)]
struct Cli {
    /// CSV station catalog (name,base_heat_index,static_trend) replacing the built-in one
    #[arg(long, env = "ALAB_PH_CATALOG", global = true)]
    catalog: Option<PathBuf>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every station's heat index, risk level and trend
    Stations {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        classification: Option<RiskLevel>,
    },
    /// Show the five summary cards
    Cards {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },
    /// Count stations per risk level
    Distribution {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
    },
    /// Show the heat index and forecast error series
    Series {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, value_enum, default_value_t = Period::Week)]
        period: Period,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long)]
        classification: Option<RiskLevel>,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
    /// Write the dashboard data for a date as JSON
    Export {
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<String>,
        #[arg(long, value_enum, default_value_t = Period::Week)]
        heat_index_period: Period,
        #[arg(long, value_enum, default_value_t = Period::Week)]
        forecast_error_period: Period,
        #[arg(long)]
        classification: Option<RiskLevel>,
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn resolve_date(date: Option<String>) -> String {
    let date = date.unwrap_or_else(|| Utc::now().date_naive().format("%Y-%m-%d").to_string());
    if risk::parse_date(&date).is_none() {
        warn!("could not parse date {date:?}; showing baseline readings");
    }
    date
}

fn load_stations(path: Option<&PathBuf>) -> anyhow::Result<Vec<StationRecord>> {
    let stations = match path {
        Some(path) => catalog::load_catalog(path)?,
        None => catalog::default_catalog(),
    };
    info!("loaded {} stations", stations.len());
    Ok(stations)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose)?;

    let stations = load_stations(cli.catalog.as_ref())?;

    match cli.command {
        Commands::Stations {
            date,
            classification,
        } => {
            let date = resolve_date(date);
            let snapshots =
                risk::filter_by_classification(risk::snapshot_for_date(&stations, &date), classification);

            if snapshots.is_empty() {
                println!("No stations match this classification.");
                return Ok(());
            }

            println!("Stations overview for {date}:");
            for snapshot in snapshots.iter() {
                println!(
                    "- {} {}°C {} (trend {})",
                    snapshot.name, snapshot.heat_index, snapshot.risk_level, snapshot.trend
                );
            }
        }
        Commands::Cards { date } => {
            let date = resolve_date(date);
            for card in cards::summary_cards_for_date(&stations, &date) {
                println!("{}: {} ({})", card.title, card.value, card.subtext);
            }
        }
        Commands::Distribution { date } => {
            let date = resolve_date(date);
            let snapshots = risk::snapshot_for_date(&stations, &date);
            for (level, count) in risk::risk_distribution(&snapshots) {
                println!("{level}: {count}");
            }
        }
        Commands::Series { date, period } => {
            let date = resolve_date(date);
            let heat_index = series::average_heat_index_series(&date);
            let forecast_error = series::forecast_error_series(&date);

            println!("Nationwide heat index (observed / forecasted):");
            for point in series::select_period(&heat_index, period, &date) {
                println!(
                    "- {} {:.1} / {:.1}",
                    series::format_day_with_week(point.day_of_month()),
                    point.observed,
                    point.forecasted
                );
            }

            println!("Absolute forecast error (tomorrow / day after tomorrow):");
            for point in series::select_period(&forecast_error, period, &date) {
                println!(
                    "- {} {:.2} / {:.2}",
                    series::format_day_with_week(point.day),
                    point.t_plus_one,
                    point.t_plus_two
                );
            }
        }
        Commands::Report {
            date,
            classification,
            out,
        } => {
            let date = resolve_date(date);
            let report = report::build_report(&stations, &date, classification);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write report to {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export {
            date,
            heat_index_period,
            forecast_error_period,
            classification,
            out_dir,
        } => {
            let date = resolve_date(date);
            let options = export::ExportOptions {
                heat_index_period,
                forecast_error_period,
                classification,
            };
            let payload = export::build_payload(&stations, &date, &options);
            let path = export::write_export(&payload, &out_dir)?;
            println!("Export written to {}.", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_export_options() {
        let cli = Cli::try_parse_from([
            "alab-ph",
            "export",
            "--date",
            "2025-05-17",
            "--heat-index-period",
            "month",
            "--classification",
            "extreme-caution",
        ])
        .unwrap();

        match cli.command {
            Commands::Export {
                date,
                heat_index_period,
                forecast_error_period,
                classification,
                ..
            } => {
                assert_eq!(date.as_deref(), Some("2025-05-17"));
                assert_eq!(heat_index_period, Period::Month);
                assert_eq!(forecast_error_period, Period::Week);
                assert_eq!(classification, Some(RiskLevel::ExtremeCaution));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn rejects_unknown_classification() {
        assert!(Cli::try_parse_from(["alab-ph", "stations", "--classification", "normal"]).is_err());
    }

    #[test]
    fn explicit_dates_pass_through() {
        assert_eq!(resolve_date(Some("2025-05-17".to_string())), "2025-05-17");
        assert_eq!(resolve_date(Some("soon".to_string())), "soon");
        assert!(risk::parse_date(&resolve_date(None)).is_some());
    }
}
