use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{AqiCategory, DailyMetric, DailyRecord};
use crate::error::{GenerationError, GenerationResult};

/// Headline figures for a filtered selection of days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalSummary {
    pub days: usize,
    pub average_temperature_c: f64,
    /// Whole-series average minus the selection average
    pub temperature_vs_overall_c: f64,
    pub total_rainfall_m: f64,
    pub average_rainfall_mm: f64,
    pub average_solar_kwh: f64,
    pub peak_solar_kwh: f64,
    pub average_pm25: f64,
    pub aqi_category: AqiCategory,
}

impl HistoricalSummary {
    /// Summarise `selection`, comparing its temperature against `overall`.
    pub fn compute(selection: &[DailyRecord], overall: &[DailyRecord]) -> GenerationResult<Self> {
        if selection.is_empty() {
            return Err(GenerationError::invalid("selection contains no days"));
        }
        let average_temperature_c = mean(selection, DailyMetric::TemperatureC);
        let overall_temperature_c = if overall.is_empty() {
            average_temperature_c
        } else {
            mean(overall, DailyMetric::TemperatureC)
        };
        let total_rainfall_mm: f64 = selection.iter().map(|r| r.rainfall_mm).sum();
        let average_pm25 = mean(selection, DailyMetric::AirQualityPm25);

        Ok(Self {
            days: selection.len(),
            average_temperature_c,
            temperature_vs_overall_c: overall_temperature_c - average_temperature_c,
            total_rainfall_m: total_rainfall_mm / 1000.0,
            average_rainfall_mm: total_rainfall_mm / selection.len() as f64,
            average_solar_kwh: mean(selection, DailyMetric::SolarEnergyKwh),
            peak_solar_kwh: selection
                .iter()
                .map(|r| r.solar_energy_kwh)
                .fold(f64::NEG_INFINITY, f64::max),
            average_pm25,
            aqi_category: AqiCategory::from_pm25(average_pm25),
        })
    }
}

fn mean(records: &[DailyRecord], metric: DailyMetric) -> f64 {
    records.iter().map(|r| r.metric(metric)).sum::<f64>() / records.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyMean {
    pub year: i32,
    pub mean: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean: f64,
}

fn grouped_means<K: Ord>(
    records: &[DailyRecord],
    metric: DailyMetric,
    key: impl Fn(&DailyRecord) -> K,
) -> Vec<(K, f64)> {
    let mut groups: BTreeMap<K, (f64, usize)> = BTreeMap::new();
    for record in records {
        let entry = groups.entry(key(record)).or_insert((0.0, 0));
        entry.0 += record.metric(metric);
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(k, (sum, count))| (k, sum / count as f64))
        .collect()
}

/// Mean of `metric` per year, ascending by year.
pub fn yearly_mean(records: &[DailyRecord], metric: DailyMetric) -> Vec<YearlyMean> {
    grouped_means(records, metric, |r| r.year)
        .into_iter()
        .map(|(year, mean)| YearlyMean { year, mean })
        .collect()
}

/// Mean of `metric` per calendar month across all years, ascending by month.
pub fn monthly_mean(records: &[DailyRecord], metric: DailyMetric) -> Vec<MonthlyMean> {
    grouped_means(records, metric, |r| r.month)
        .into_iter()
        .map(|(month, mean)| MonthlyMean { month, mean })
        .collect()
}

/// The chart series shown on the historical page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalTrends {
    pub yearly_temperature: Vec<YearlyMean>,
    pub yearly_pm25: Vec<YearlyMean>,
    pub monthly_solar: Vec<MonthlyMean>,
    pub monthly_rainfall: Vec<MonthlyMean>,
}

impl HistoricalTrends {
    pub fn compute(records: &[DailyRecord]) -> Self {
        Self {
            yearly_temperature: yearly_mean(records, DailyMetric::TemperatureC),
            yearly_pm25: yearly_mean(records, DailyMetric::AirQualityPm25),
            monthly_solar: monthly_mean(records, DailyMetric::SolarEnergyKwh),
            monthly_rainfall: monthly_mean(records, DailyMetric::RainfallMm),
        }
    }
}
