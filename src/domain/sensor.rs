use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Air quality band derived from PM2.5 concentration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum AqiCategory {
    Good,
    Moderate,
    Poor,
}

impl AqiCategory {
    pub fn from_pm25(pm25: f64) -> Self {
        if pm25 < 50.0 {
            AqiCategory::Good
        } else if pm25 < 100.0 {
            AqiCategory::Moderate
        } else {
            AqiCategory::Poor
        }
    }
}

/// How well a building holds its indoor temperature against the outdoors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum InsulationQuality {
    Good,
    Fair,
    Poor,
}

impl InsulationQuality {
    pub fn from_delta(delta_c: f64) -> Self {
        let spread = delta_c.abs();
        if spread >= 10.0 {
            InsulationQuality::Good
        } else if spread >= 5.0 {
            InsulationQuality::Fair
        } else {
            InsulationQuality::Poor
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarReading {
    pub irradiance_w_m2: f64,
    pub power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    pub pm25: f64,
    pub pm10: f64,
    pub co2_ppm: f64,
    pub category: AqiCategory,
}

impl AirQualityReading {
    pub fn new(pm25: f64, pm10: f64, co2_ppm: f64) -> Self {
        Self {
            pm25,
            pm10,
            co2_ppm,
            category: AqiCategory::from_pm25(pm25),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterReading {
    pub flow_l_min: f64,
    pub tank_level_percent: f64,
    /// Total dissolved solids
    pub tds_ppm: f64,
    pub ph: f64,
}

/// Bins at or above this fill level are flagged for collection.
pub const BIN_COLLECTION_THRESHOLD_PERCENT: f64 = 80.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinReading {
    pub bin: String,
    pub fill_percent: f64,
    pub needs_collection: bool,
}

impl BinReading {
    pub fn new(bin: impl Into<String>, fill_percent: f64) -> Self {
        Self {
            bin: bin.into(),
            fill_percent,
            needs_collection: fill_percent >= BIN_COLLECTION_THRESHOLD_PERCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteReading {
    pub bins: Vec<BinReading>,
    pub average_fill_percent: f64,
}

impl WasteReading {
    pub fn new(bins: Vec<BinReading>) -> Self {
        let average_fill_percent = if bins.is_empty() {
            0.0
        } else {
            bins.iter().map(|b| b.fill_percent).sum::<f64>() / bins.len() as f64
        };
        Self {
            bins,
            average_fill_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalReading {
    pub outdoor_temp_c: f64,
    pub indoor_temp_c: f64,
    pub humidity_percent: f64,
    /// indoor minus outdoor
    pub delta_c: f64,
    pub insulation: InsulationQuality,
}

impl ThermalReading {
    pub fn new(outdoor_temp_c: f64, indoor_temp_c: f64, humidity_percent: f64) -> Self {
        let delta_c = indoor_temp_c - outdoor_temp_c;
        Self {
            outdoor_temp_c,
            indoor_temp_c,
            humidity_percent,
            delta_c,
            insulation: InsulationQuality::from_delta(delta_c),
        }
    }
}

/// Point-in-time reading across all simulated campus sensors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    pub timestamp: NaiveDateTime,
    pub solar: SolarReading,
    pub air_quality: AirQualityReading,
    pub water: WaterReading,
    pub waste: WasteReading,
    pub thermal: ThermalReading,
}
