use crate::models::{StationRecord, StationSnapshot, SummaryCard};
use crate::risk::{previous_date_str, round_half_up, snapshot_for_date};

pub const CARD_TITLES: [&str; 5] = [
    "Highest Forecasted Heat Index",
    "Lowest Forecasted Heat Index",
    "Average Forecasted Heat Index",
    "Number of Stations in Danger-Extreme Danger",
    "Most Rapidly Increasing Station (in 24 hrs)",
];

/// The five dashboard summary cards for `date_str`, compared against the day before.
pub fn summary_cards_for_date(catalog: &[StationRecord], date_str: &str) -> Vec<SummaryCard> {
    let list = snapshot_for_date(catalog, date_str);
    let prev_list = snapshot_for_date(catalog, &previous_date_str(date_str));

    let Some(first) = list.first() else {
        return placeholder_cards();
    };

    let max_station = list
        .iter()
        .fold(first, |best, s| if s.heat_index > best.heat_index { s } else { best });
    let min_station = list
        .iter()
        .fold(first, |best, s| if s.heat_index < best.heat_index { s } else { best });

    let avg = mean_heat_index(&list);
    let avg_prev = mean_heat_index(&prev_list);
    let avg_diff = avg - avg_prev;

    let danger_count = list
        .iter()
        .filter(|s| s.risk_level.is_danger_or_worse())
        .count();

    let mut increases: Vec<(&str, i32)> = list
        .iter()
        .map(|s| {
            let prev_heat_index = prev_list
                .iter()
                .find(|p| p.name == s.name)
                .map_or(s.heat_index, |p| p.heat_index);
            (s.name.as_str(), s.heat_index - prev_heat_index)
        })
        .collect();
    // stable, so ties keep catalog order
    increases.sort_by(|a, b| b.1.cmp(&a.1));
    let (top_name, top_diff) = increases[0];

    let top_value = if top_diff > 0 {
        format!("+{top_diff}°C")
    } else {
        format!("{top_diff}°C")
    };

    vec![
        card(0, format!("{}°C", max_station.heat_index), &max_station.name),
        card(1, format!("{}°C", min_station.heat_index), &min_station.name),
        card(
            2,
            format!("{avg}°C"),
            &format!("{:.1}° C vs. previous day", avg_diff as f64),
        ),
        card(3, danger_count.to_string(), "stations in Luzon"),
        card(4, top_value, top_name),
    ]
}

fn mean_heat_index(list: &[StationSnapshot]) -> i32 {
    if list.is_empty() {
        return 0;
    }
    let total: i64 = list.iter().map(|s| i64::from(s.heat_index)).sum();
    round_half_up(total as f64 / list.len() as f64)
}

fn card(index: usize, value: String, subtext: &str) -> SummaryCard {
    SummaryCard {
        title: CARD_TITLES[index].to_string(),
        value,
        subtext: subtext.to_string(),
    }
}

fn placeholder_cards() -> Vec<SummaryCard> {
    (0..CARD_TITLES.len())
        .map(|index| card(index, "-".to_string(), ""))
        .collect()
}
