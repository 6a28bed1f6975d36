//! CSV export of generated tables.
//!
//! Columns follow the record's field declaration order and floats are written
//! with one decimal, matching what the dashboard displays.

use itertools::Itertools;

use crate::domain::building::slugify;
use crate::domain::{DailyRecord, HourlyRecord};

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn decimal(value: f64) -> String {
    format!("{value:.1}")
}

pub fn daily_header() -> String {
    DailyRecord::FIELDS.iter().join(",")
}

pub fn daily_row(record: &DailyRecord) -> String {
    [
        record.date.to_string(),
        record.year.to_string(),
        record.month.to_string(),
        record.day.to_string(),
        escape(&record.season.to_string()),
        decimal(record.temperature_c),
        decimal(record.rainfall_mm),
        decimal(record.sunshine_hours),
        decimal(record.solar_energy_kwh),
        decimal(record.humidity_percent),
        decimal(record.air_quality_pm25),
        decimal(record.pm10),
        decimal(record.water_consumption_l),
        decimal(record.waste_kg),
        decimal(record.heating_demand),
    ]
    .iter()
    .join(",")
}

/// Render a daily table as CSV with a header row.
pub fn daily_csv(records: &[DailyRecord]) -> String {
    let mut out = daily_header();
    out.push('\n');
    for record in records {
        out.push_str(&daily_row(record));
        out.push('\n');
    }
    out
}

/// Column name for a building's demand, e.g. `demand_admin_block`.
pub fn demand_column(building: &str) -> String {
    format!("demand_{}", slugify(building))
}

/// Render an hourly profile as CSV.
///
/// Building demand expands into one column per building, in catalog order,
/// between `solar_kw` and `total_demand_kw`.
pub fn hourly_csv(records: &[HourlyRecord]) -> String {
    let buildings: Vec<&str> = records
        .first()
        .map(|r| r.building_demand.iter().map(|d| d.building.as_str()).collect())
        .unwrap_or_default();

    let header = std::iter::once("hour".to_string())
        .chain(std::iter::once("solar_kw".to_string()))
        .chain(buildings.iter().map(|b| escape(&demand_column(b))))
        .chain(["total_demand_kw", "grid_import_kw", "battery_soc"].map(String::from))
        .join(",");

    let mut out = header;
    out.push('\n');
    for record in records {
        let row = std::iter::once(record.hour.to_string())
            .chain(std::iter::once(decimal(record.solar_kw)))
            .chain(record.building_demand.iter().map(|d| decimal(d.demand_kw)))
            .chain([
                decimal(record.total_demand_kw),
                decimal(record.grid_import_kw),
                decimal(record.battery_soc),
            ])
            .join(",");
        out.push_str(&row);
        out.push('\n');
    }
    out
}
