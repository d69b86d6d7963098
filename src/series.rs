use chrono::Datelike;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::models::{AverageHeatIndexPoint, ForecastErrorPoint, Period};
use crate::risk::parse_date;

pub const DAYS_IN_SERIES: u32 = 31;
const DAYS_PER_WEEK: u32 = 7;

/// A chart point keyed by day of month.
pub trait DailyPoint {
    fn day_of_month(&self) -> u32;
}

impl DailyPoint for AverageHeatIndexPoint {
    fn day_of_month(&self) -> u32 {
        self.day.parse().unwrap_or(0)
    }
}

impl DailyPoint for ForecastErrorPoint {
    fn day_of_month(&self) -> u32 {
        self.day
    }
}

/// Mock data is seeded per calendar month, so every date in a month sees the same series.
fn series_rng(date_str: &str, stream: u64) -> ChaCha8Rng {
    let month_key = parse_date(date_str)
        .map(|date| i64::from(date.year()) * 100 + i64::from(date.month()))
        .unwrap_or(0);
    // signed years are valid dates; reinterpret rather than overflow
    let seed = (month_key as u64).wrapping_mul(2).wrapping_add(stream);
    ChaCha8Rng::seed_from_u64(seed)
}

pub fn average_heat_index_series(date_str: &str) -> Vec<AverageHeatIndexPoint> {
    let mut rng = series_rng(date_str, 0);
    (1..=DAYS_IN_SERIES)
        .map(|day| AverageHeatIndexPoint {
            day: format!("{day:02}"),
            observed: 37.0 + rng.gen::<f64>() * 8.0,
            forecasted: 36.0 + rng.gen::<f64>() * 8.0,
        })
        .collect()
}

pub fn forecast_error_series(date_str: &str) -> Vec<ForecastErrorPoint> {
    let mut rng = series_rng(date_str, 1);
    (1..=DAYS_IN_SERIES)
        .map(|day| ForecastErrorPoint {
            day,
            t_plus_one: 1.0 + rng.gen::<f64>() * 3.0,
            t_plus_two: 1.5 + rng.gen::<f64>() * 3.5,
        })
        .collect()
}

pub fn week_for_day(day: u32) -> u32 {
    day.div_ceil(DAYS_PER_WEEK)
}

/// Week of the month holding `date_str`; unparseable dates fall in week 1.
pub fn week_of_month(date_str: &str) -> u32 {
    parse_date(date_str)
        .map(|date| week_for_day(date.day()))
        .unwrap_or(1)
}

pub fn filter_by_week<T: DailyPoint + Clone>(points: &[T], week: u32) -> Vec<T> {
    let start_day = week.saturating_sub(1) * DAYS_PER_WEEK + 1;
    let end_day = start_day + DAYS_PER_WEEK - 1;
    points
        .iter()
        .filter(|point| (start_day..=end_day).contains(&point.day_of_month()))
        .cloned()
        .collect()
}

pub fn select_period<T: DailyPoint + Clone>(points: &[T], period: Period, date_str: &str) -> Vec<T> {
    match period {
        Period::Week => filter_by_week(points, week_of_month(date_str)),
        Period::Month => points.iter().take(DAYS_IN_SERIES as usize).cloned().collect(),
    }
}

/// Axis label such as `W2 09`.
pub fn format_day_with_week(day: u32) -> String {
    format!("W{} {day:02}", week_for_day(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn series_cover_the_whole_month_within_bounds() {
        let heat = average_heat_index_series("2025-05-17");
        assert_eq!(heat.len(), 31);
        assert_eq!(heat[0].day, "01");
        assert_eq!(heat[30].day, "31");
        assert!(heat
            .iter()
            .all(|p| (37.0..45.0).contains(&p.observed) && (36.0..44.0).contains(&p.forecasted)));

        let errors = forecast_error_series("2025-05-17");
        assert_eq!(errors.len(), 31);
        assert!(errors
            .iter()
            .all(|p| (1.0..4.0).contains(&p.t_plus_one) && (1.5..5.0).contains(&p.t_plus_two)));
    }

    #[test]
    fn series_are_stable_within_a_month() {
        assert_eq!(
            average_heat_index_series("2025-05-02"),
            average_heat_index_series("2025-05-30")
        );
        assert_ne!(
            forecast_error_series("2025-05-02"),
            forecast_error_series("2025-06-02")
        );
    }

    #[test]
    fn signed_year_dates_still_produce_series() {
        let heat = average_heat_index_series("-0001-05-17");
        assert_eq!(heat.len(), 31);
        assert_eq!(
            forecast_error_series("-0001-05-17"),
            forecast_error_series("-0001-05-02")
        );
        assert_ne!(
            average_heat_index_series("-0001-05-17"),
            average_heat_index_series("0001-05-17")
        );
        assert_eq!(week_of_month("-0001-05-17"), 3);
    }

    #[test]
    fn weeks_are_seven_day_blocks() {
        assert_eq!(week_of_month("2025-05-01"), 1);
        assert_eq!(week_of_month("2025-05-07"), 1);
        assert_eq!(week_of_month("2025-05-08"), 2);
        assert_eq!(week_of_month("2025-05-28"), 4);
        assert_eq!(week_of_month("2025-05-29"), 5);
        assert_eq!(week_of_month("garbage"), 1);
    }

    #[test]
    fn week_filter_selects_matching_days() {
        let errors = forecast_error_series("2025-05-17");
        let week_three = filter_by_week(&errors, 3);
        let days: Vec<u32> = week_three.iter().map(|p| p.day).collect();
        assert_eq!(days, (15..=21).collect::<Vec<_>>());

        let heat = average_heat_index_series("2025-05-17");
        let week_five = filter_by_week(&heat, 5);
        let days: Vec<&str> = week_five.iter().map(|p| p.day.as_str()).collect();
        assert_eq!(days, vec!["29", "30", "31"]);
    }

    #[test]
    fn period_selects_week_or_month() {
        let heat = average_heat_index_series("2025-05-10");
        assert_eq!(select_period(&heat, Period::Week, "2025-05-10").len(), 7);
        assert_eq!(select_period(&heat, Period::Month, "2025-05-10").len(), 31);
    }

    #[test]
    fn day_labels_carry_week_prefix() {
        assert_eq!(format_day_with_week(1), "W1 01");
        assert_eq!(format_day_with_week(9), "W2 09");
        assert_eq!(format_day_with_week(31), "W5 31");
    }
}
