//! # Live Campus Simulation
//!
//! Projects "current" campus conditions from the historical series under a
//! chosen weather condition and activity level.

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum::{Display, EnumIter, EnumString};

use crate::domain::{AqiCategory, DailyRecord};
use crate::error::{GenerationError, GenerationResult};

use super::{daylight_fraction, is_daylight};

/// Share of solar output that remains outside daylight hours in the headline figure.
const NIGHT_SOLAR_FACTOR: f64 = 0.1;
const BASE_DEMAND_KW: f64 = 800.0;
const DEMAND_SWING_KW: f64 = 300.0;
const MIN_CURVE_DEMAND_KW: f64 = 500.0;
const WORKING_HOURS_EXTRA_KW: f64 = 20.0;

/// Sky condition selected for the live view.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(ascii_case_insensitive, serialize_all = "snake_case")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl WeatherCondition {
    /// Multiplier applied to the historical solar yield.
    pub fn solar_factor(&self) -> f64 {
        match self {
            WeatherCondition::Sunny => 1.2,
            WeatherCondition::PartlyCloudy => 0.9,
            WeatherCondition::Cloudy => 0.6,
            WeatherCondition::Rainy => 0.3,
        }
    }

    pub fn temperature_offset_c(&self) -> f64 {
        match self {
            WeatherCondition::Sunny => 2.0,
            WeatherCondition::Rainy => -2.0,
            _ => 0.0,
        }
    }

    /// Cloud cover traps particulates; every other sky clears them slightly.
    pub fn pm25_factor(&self) -> f64 {
        match self {
            WeatherCondition::Cloudy => 1.2,
            _ => 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveParams {
    pub weather: WeatherCondition,
    /// Campus activity level in percent (0-100)
    pub activity: u8,
}

impl Default for LiveParams {
    fn default() -> Self {
        Self {
            weather: WeatherCondition::Sunny,
            activity: 70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LivePoint {
    pub hour: u32,
    pub solar_kw: f64,
    pub demand_kw: f64,
}

/// Where the campus gets its power from at the current hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EnergyFlow {
    /// Solar exceeds demand; the excess charges the batteries.
    Surplus { excess_kw: f64 },
    /// Solar covers part of demand and the grid supplies the rest.
    Deficit { shortfall_kw: f64 },
    /// No solar; running on battery and grid.
    Night,
}

impl EnergyFlow {
    pub fn classify(solar_kw: f64, demand_kw: f64) -> Self {
        if solar_kw > demand_kw {
            EnergyFlow::Surplus {
                excess_kw: solar_kw - demand_kw,
            }
        } else if solar_kw > 0.0 {
            EnergyFlow::Deficit {
                shortfall_kw: demand_kw - solar_kw,
            }
        } else {
            EnergyFlow::Night
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveConditions {
    pub timestamp: NaiveDateTime,
    pub weather: WeatherCondition,
    pub activity: u8,
    pub solar_kw: f64,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub demand_kw: f64,
    pub pm25: f64,
    pub aqi_category: AqiCategory,
    pub curve: Vec<LivePoint>,
    pub energy_flow: EnergyFlow,
}

/// Build the live view for `timestamp`.
///
/// The baseline is the first historical day of the timestamp's month.
pub fn simulate_live(
    history: &[DailyRecord],
    timestamp: NaiveDateTime,
    params: LiveParams,
) -> GenerationResult<LiveConditions> {
    if params.activity > 100 {
        return Err(GenerationError::invalid(format!(
            "activity must be within 0-100, got {}",
            params.activity
        )));
    }
    let month = timestamp.month();
    let baseline = history
        .iter()
        .find(|record| record.month == month)
        .ok_or_else(|| {
            GenerationError::invalid(format!("history has no records for month {month}"))
        })?;

    let hour = timestamp.hour();
    let factor = params.weather.solar_factor();
    let activity_offset = params.activity as f64 - 50.0;

    let daylight = if is_daylight(hour) { 1.0 } else { NIGHT_SOLAR_FACTOR };
    let solar_kw = baseline.solar_energy_kwh * factor * daylight;
    let working = if (8..=18).contains(&hour) {
        WORKING_HOURS_EXTRA_KW
    } else {
        0.0
    };
    let demand_kw = BASE_DEMAND_KW + activity_offset * 10.0 + working;
    let pm25 = baseline.air_quality_pm25 * params.weather.pm25_factor();

    let curve: Vec<LivePoint> = (0..24)
        .map(|h| LivePoint {
            hour: h,
            solar_kw: baseline.solar_energy_kwh * factor * daylight_fraction(h),
            demand_kw: (BASE_DEMAND_KW
                + DEMAND_SWING_KW * ((h as f64 - 8.0) / 12.0 * PI).sin()
                + activity_offset * 5.0)
                .max(MIN_CURVE_DEMAND_KW),
        })
        .collect();

    let now = curve[hour as usize];
    let energy_flow = EnergyFlow::classify(now.solar_kw, now.demand_kw);

    Ok(LiveConditions {
        timestamp,
        weather: params.weather,
        activity: params.activity,
        solar_kw,
        temperature_c: baseline.temperature_c + params.weather.temperature_offset_c(),
        humidity_percent: baseline.humidity_percent,
        demand_kw,
        pm25,
        aqi_category: AqiCategory::from_pm25(pm25),
        curve,
        energy_flow,
    })
}
