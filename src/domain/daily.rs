use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::Season;

/// One synthetic day of campus weather and resource data.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub season: Season,
    pub temperature_c: f64,
    pub rainfall_mm: f64,
    pub sunshine_hours: f64,
    pub solar_energy_kwh: f64,
    pub humidity_percent: f64,
    pub air_quality_pm25: f64,
    pub pm10: f64,
    pub water_consumption_l: f64,
    pub waste_kg: f64,
    pub heating_demand: f64,
}

impl DailyRecord {
    pub const FIELDS: [&'static str; 15] = [
        "date",
        "year",
        "month",
        "day",
        "season",
        "temperature_c",
        "rainfall_mm",
        "sunshine_hours",
        "solar_energy_kwh",
        "humidity_percent",
        "air_quality_pm25",
        "pm10",
        "water_consumption_l",
        "waste_kg",
        "heating_demand",
    ];

    pub fn metric(&self, metric: DailyMetric) -> f64 {
        match metric {
            DailyMetric::TemperatureC => self.temperature_c,
            DailyMetric::RainfallMm => self.rainfall_mm,
            DailyMetric::SunshineHours => self.sunshine_hours,
            DailyMetric::SolarEnergyKwh => self.solar_energy_kwh,
            DailyMetric::HumidityPercent => self.humidity_percent,
            DailyMetric::AirQualityPm25 => self.air_quality_pm25,
            DailyMetric::Pm10 => self.pm10,
            DailyMetric::WaterConsumptionL => self.water_consumption_l,
            DailyMetric::WasteKg => self.waste_kg,
            DailyMetric::HeatingDemand => self.heating_demand,
        }
    }
}

/// Numeric columns of a [`DailyRecord`] that can be aggregated.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DailyMetric {
    TemperatureC,
    RainfallMm,
    SunshineHours,
    SolarEnergyKwh,
    HumidityPercent,
    AirQualityPm25,
    Pm10,
    WaterConsumptionL,
    WasteKg,
    HeatingDemand,
}
