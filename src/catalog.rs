use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};

use crate::models::StationRecord;

const STATIONS: [(&str, i32, Option<&str>); 23] = [
    ("Ambulong, Batangas", 40, Some("+1.1°C")),
    ("Baguio City, Benguet", 42, Some("-2.1°C")),
    ("Baler, Aurora", 41, None),
    ("Basco, Batanes", 39, None),
    ("Calapan, Oriental Mindoro", 38, None),
    ("Clark Airport, Pampanga", 45, None),
    ("Daet, Camarines Norte", 39, None),
    ("Dagupan City, Pangasinan", 41, None),
    ("Iba, Zambales", 42, None),
    ("Infanta, Quezon", 41, None),
    ("Laoag City, Ilocos Norte", 40, Some("+1.1°C")),
    ("Legazpi City, Albay", 42, Some("-2.1°C")),
    ("NAIA, Pasay City", 41, None),
    ("Port Area, Manila City", 39, None),
    ("Puerto Princesa, Palawan", 38, None),
    ("San Jose, Occidental Mindoro", 45, None),
    ("Sangley Point, Cavite", 39, None),
    ("Science Garden, Quezon City", 41, None),
    ("Sinait, Ilocos Sur", 42, None),
    ("Tanay, Rizal", 41, None),
    ("Tayabas, Quezon", 41, None),
    ("Tuguegarao, Cagayan", 41, None),
    ("Virac, Catanduanes", 41, None),
];

/// The built-in Luzon synoptic station catalog.
pub fn default_catalog() -> Vec<StationRecord> {
    STATIONS
        .iter()
        .map(|(name, base_heat_index, static_trend)| StationRecord {
            name: name.to_string(),
            base_heat_index: *base_heat_index,
            static_trend: static_trend.map(str::to_string),
        })
        .collect()
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<StationRecord>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open station catalog {}", path.display()))?;
    read_catalog(file).with_context(|| format!("invalid station catalog {}", path.display()))
}

/// Reads `name,base_heat_index,static_trend` rows, keeping file order.
pub fn read_catalog<R: Read>(reader: R) -> anyhow::Result<Vec<StationRecord>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut stations = Vec::new();
    let mut seen = HashSet::new();

    for (row, result) in reader.deserialize::<StationRecord>().enumerate() {
        let mut station = result.with_context(|| format!("malformed station row {}", row + 1))?;
        if !seen.insert(station.name.clone()) {
            bail!("duplicate station name '{}'", station.name);
        }
        if station.static_trend.as_deref() == Some("") {
            station.static_trend = None;
        }
        stations.push(station);
    }

    if stations.is_empty() {
        bail!("station catalog has no stations");
    }

    Ok(stations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_has_all_luzon_stations_in_order() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 23);
        assert_eq!(catalog[0].name, "Ambulong, Batangas");
        assert_eq!(catalog[22].name, "Virac, Catanduanes");
        assert_eq!(catalog[5].base_heat_index, 45);
        assert_eq!(catalog[1].static_trend.as_deref(), Some("-2.1°C"));
        assert_eq!(catalog[2].static_trend, None);

        let unique: HashSet<_> = catalog.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(unique.len(), catalog.len());
    }

    #[test]
    fn reads_csv_catalog_with_optional_trend() {
        let data = "name,base_heat_index,static_trend\n\
                    \"Iba, Zambales\",42,+0.5°C\n\
                    \"Tanay, Rizal\",41,\n";
        let catalog = read_catalog(data.as_bytes()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].name, "Iba, Zambales");
        assert_eq!(catalog[0].static_trend.as_deref(), Some("+0.5°C"));
        assert_eq!(catalog[1].base_heat_index, 41);
        assert_eq!(catalog[1].static_trend, None);
    }

    #[test]
    fn rejects_duplicate_station_names() {
        let data = "name,base_heat_index,static_trend\nBasco,39,\nBasco,40,\n";
        let err = read_catalog(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("duplicate station name"));
    }

    #[test]
    fn rejects_empty_catalog() {
        let data = "name,base_heat_index,static_trend\n";
        assert!(read_catalog(data.as_bytes()).is_err());
    }

    #[test]
    fn rejects_non_numeric_heat_index() {
        let data = "name,base_heat_index,static_trend\nBasco,hot,\n";
        assert!(read_catalog(data.as_bytes()).is_err());
    }
}
