//! # Solar Prediction
//!
//! Short-range outlook built from the monthly means of the historical series,
//! with a linear trend, uniform noise and a symmetric confidence band.

use chrono::{Datelike, Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{monthly_mean, MonthlyMean};
use crate::domain::{DailyMetric, DailyRecord};
use crate::error::{GenerationError, GenerationResult};
use crate::simulation::seeded_rng;

pub const MAX_DAYS_AHEAD: u32 = 30;
pub const CONFIDENCE_RANGE: (u8, u8) = (50, 95);

/// Solar growth per predicted day, relative to the monthly mean.
const SOLAR_TREND_PER_DAY: f64 = 0.01;
const TEMPERATURE_TREND_PER_DAY: f64 = 0.05;
/// Band width in percent at 0 % confidence; narrows linearly as confidence rises.
const MAX_BAND_PERCENT: f64 = 30.0;
const MAX_TEMPERATURE_MARGIN_C: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionParams {
    pub days_ahead: u32,
    /// Confidence level in percent
    pub confidence: u8,
}

impl Default for PredictionParams {
    fn default() -> Self {
        Self {
            days_ahead: 7,
            confidence: 80,
        }
    }
}

impl PredictionParams {
    pub fn validate(&self) -> GenerationResult<()> {
        if !(1..=MAX_DAYS_AHEAD).contains(&self.days_ahead) {
            return Err(GenerationError::invalid(format!(
                "days_ahead must be within 1-{MAX_DAYS_AHEAD}, got {}",
                self.days_ahead
            )));
        }
        if !(CONFIDENCE_RANGE.0..=CONFIDENCE_RANGE.1).contains(&self.confidence) {
            return Err(GenerationError::invalid(format!(
                "confidence must be within {}-{}, got {}",
                CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1, self.confidence
            )));
        }
        Ok(())
    }

    /// Half-width of the solar band in percent of the prediction.
    pub fn band_percent(&self) -> f64 {
        (100.0 - self.confidence as f64) / 100.0 * MAX_BAND_PERCENT
    }

    pub fn temperature_margin_c(&self) -> f64 {
        (100.0 - self.confidence as f64) / 100.0 * MAX_TEMPERATURE_MARGIN_C
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub predicted_solar: f64,
    pub predicted_temp: f64,
    pub predicted_rain: f64,
    pub confidence_upper: f64,
    pub confidence_lower: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub average_solar_kwh: f64,
    pub average_temp_c: f64,
    pub temp_margin_c: f64,
    pub total_rain_mm: f64,
    pub confidence: u8,
    pub days_ahead: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionReport {
    pub predictions: Vec<DailyPrediction>,
    pub summary: PredictionSummary,
}

/// Predicts solar, temperature and rainfall for the days after a reference date.
#[derive(Debug, Clone, Copy)]
pub struct SolarPredictor {
    seed: Option<u64>,
}

impl SolarPredictor {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn predict(
        &self,
        history: &[DailyRecord],
        reference: NaiveDate,
        params: PredictionParams,
    ) -> GenerationResult<PredictionReport> {
        params.validate()?;

        let solar = monthly_mean(history, DailyMetric::SolarEnergyKwh);
        let temperature = monthly_mean(history, DailyMetric::TemperatureC);
        let rainfall = monthly_mean(history, DailyMetric::RainfallMm);

        let mut rng = seeded_rng(self.seed);
        let band = params.band_percent() / 100.0;
        let mut predictions = Vec::with_capacity(params.days_ahead as usize);

        for step in 0..params.days_ahead {
            let date = reference
                .checked_add_days(Days::new(step as u64 + 1))
                .ok_or_else(|| {
                    GenerationError::invalid("prediction horizon exceeds the calendar")
                })?;
            let month = date.month();
            let i = step as f64;

            let predicted_solar = mean_for(&solar, month)? * (1.0 + SOLAR_TREND_PER_DAY * i)
                + rng.gen_range(-20.0..=20.0);
            let predicted_temp = mean_for(&temperature, month)?
                + TEMPERATURE_TREND_PER_DAY * i
                + rng.gen_range(-1.0..=1.0);
            let predicted_rain =
                (mean_for(&rainfall, month)? + rng.gen_range(-10.0..=10.0)).max(0.0);

            predictions.push(DailyPrediction {
                date,
                predicted_solar,
                predicted_temp,
                predicted_rain,
                confidence_upper: predicted_solar * (1.0 + band),
                confidence_lower: predicted_solar * (1.0 - band),
            });
        }

        let n = predictions.len() as f64;
        let summary = PredictionSummary {
            average_solar_kwh: predictions.iter().map(|p| p.predicted_solar).sum::<f64>() / n,
            average_temp_c: predictions.iter().map(|p| p.predicted_temp).sum::<f64>() / n,
            temp_margin_c: params.temperature_margin_c(),
            total_rain_mm: predictions.iter().map(|p| p.predicted_rain).sum(),
            confidence: params.confidence,
            days_ahead: params.days_ahead,
        };

        debug!(
            %reference,
            days_ahead = params.days_ahead,
            confidence = params.confidence,
            "generated predictions"
        );
        Ok(PredictionReport {
            predictions,
            summary,
        })
    }
}

fn mean_for(means: &[MonthlyMean], month: u32) -> GenerationResult<f64> {
    means
        .iter()
        .find(|m| m.month == month)
        .map(|m| m.mean)
        .ok_or_else(|| {
            GenerationError::invalid(format!("history has no records for month {month}"))
        })
}
