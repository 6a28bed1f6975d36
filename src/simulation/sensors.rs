//! # Instantaneous Sensor Sampler
//!
//! Produces a single "current reading" across the campus sensor network.
//! Solar follows the daylight curve and PM2.5 follows a seasonal swing; the
//! water, waste and thermal channels are independent uniform draws.

use chrono::{Datelike, NaiveDateTime, Timelike};
use rand::Rng;
use std::f64::consts::PI;

use crate::domain::{
    AirQualityReading, BinReading, SensorSnapshot, SolarReading, ThermalReading, WasteReading,
    WaterReading,
};

use super::{daylight_fraction, seeded_rng};

/// Clear-sky peak irradiance at solar noon.
const PEAK_IRRADIANCE_W_M2: f64 = 1000.0;

pub fn default_bins() -> Vec<String> {
    ["Academic Block", "Hostel", "Cafeteria", "Library", "Admin Block"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone)]
pub struct InstantaneousSensorSampler {
    solar_capacity_kw: f64,
    bins: Vec<String>,
    seed: Option<u64>,
}

impl InstantaneousSensorSampler {
    pub fn new(solar_capacity_kw: f64, seed: Option<u64>) -> Self {
        Self {
            solar_capacity_kw: solar_capacity_kw.max(0.0),
            bins: default_bins(),
            seed,
        }
    }

    pub fn with_bins(mut self, bins: Vec<String>) -> Self {
        self.bins = bins;
        self
    }

    /// Sample every sensor at `timestamp`.
    ///
    /// With a seed, the random sequence is keyed by the timestamp so the same
    /// instant always yields the same snapshot.
    pub fn sample(&self, timestamp: NaiveDateTime) -> SensorSnapshot {
        let mut rng = seeded_rng(
            self.seed
                .map(|seed| seed ^ timestamp.and_utc().timestamp() as u64),
        );

        let solar = self.sample_solar(&mut rng, timestamp.hour());
        let air_quality = sample_air_quality(&mut rng, timestamp.month());

        let water = WaterReading {
            flow_l_min: rng.gen_range(20.0..=80.0),
            tank_level_percent: rng.gen_range(40.0..=95.0),
            tds_ppm: rng.gen_range(150.0..=350.0),
            ph: rng.gen_range(6.5..=8.5),
        };

        let bins = self
            .bins
            .iter()
            .map(|bin| BinReading::new(bin.clone(), rng.gen_range(10.0..=95.0)))
            .collect();
        let waste = WasteReading::new(bins);

        let thermal = ThermalReading::new(
            rng.gen_range(5.0..=30.0),
            rng.gen_range(18.0..=26.0),
            rng.gen_range(30.0..=80.0),
        );

        SensorSnapshot {
            timestamp,
            solar,
            air_quality,
            water,
            waste,
            thermal,
        }
    }

    fn sample_solar<R: Rng>(&self, rng: &mut R, hour: u32) -> SolarReading {
        let fraction = daylight_fraction(hour);
        if fraction == 0.0 {
            return SolarReading {
                irradiance_w_m2: 0.0,
                power_kw: 0.0,
            };
        }
        let irradiance_w_m2 = PEAK_IRRADIANCE_W_M2 * fraction * rng.gen_range(0.85..=1.05);
        let power_kw = irradiance_w_m2 / PEAK_IRRADIANCE_W_M2
            * self.solar_capacity_kw
            * rng.gen_range(0.92..=1.0);
        SolarReading {
            irradiance_w_m2,
            power_kw,
        }
    }
}

/// Seasonal PM2.5 baseline: `45 + 30 * sin((month - 1) / 11 * π)`.
pub fn seasonal_pm25_baseline(month: u32) -> f64 {
    45.0 + 30.0 * ((month as f64 - 1.0) / 11.0 * PI).sin()
}

fn sample_air_quality<R: Rng>(rng: &mut R, month: u32) -> AirQualityReading {
    let pm25 = (seasonal_pm25_baseline(month) + rng.gen_range(-10.0..=10.0)).max(0.0);
    let pm10 = pm25 * rng.gen_range(1.5..=1.6);
    let co2_ppm = rng.gen_range(380.0..=520.0);
    AirQualityReading::new(pm25, pm10, co2_ppm)
}
