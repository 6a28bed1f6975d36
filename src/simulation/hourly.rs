//! # Hourly Campus Profile
//!
//! Models one representative day: solar output along the daylight half-sine,
//! and each building's demand from a daypart multiplier with noise.

use rand::Rng;
use std::f64::consts::PI;
use tracing::debug;

use crate::domain::{Building, BuildingCatalog, BuildingDemand, Daypart, HourlyRecord};
use crate::error::{GenerationError, GenerationResult};

use super::{daylight_fraction, seeded_rng};

const DAY_MULTIPLIER: f64 = 0.8;
const NIGHT_MULTIPLIER: f64 = 0.3;

/// Generates the 24-hour demand and solar profile for a building catalog.
#[derive(Debug, Clone)]
pub struct HourlyProfileGenerator {
    catalog: BuildingCatalog,
    solar_capacity_kw: f64,
    seed: Option<u64>,
}

impl HourlyProfileGenerator {
    pub fn new(
        catalog: BuildingCatalog,
        solar_capacity_kw: f64,
        seed: Option<u64>,
    ) -> GenerationResult<Self> {
        if !solar_capacity_kw.is_finite() || solar_capacity_kw < 0.0 {
            return Err(GenerationError::invalid(format!(
                "solar capacity must be a non-negative number, got {solar_capacity_kw}"
            )));
        }
        Ok(Self {
            catalog,
            solar_capacity_kw,
            seed,
        })
    }

    /// Convenience constructor that validates a raw building list first.
    pub fn from_buildings(
        buildings: Vec<Building>,
        solar_capacity_kw: f64,
        seed: Option<u64>,
    ) -> GenerationResult<Self> {
        Self::new(BuildingCatalog::new(buildings)?, solar_capacity_kw, seed)
    }

    pub fn catalog(&self) -> &BuildingCatalog {
        &self.catalog
    }

    pub fn solar_capacity_kw(&self) -> f64 {
        self.solar_capacity_kw
    }

    /// Produce the 24 records for hours 0 through 23.
    pub fn generate(&self) -> Vec<HourlyRecord> {
        let mut rng = seeded_rng(self.seed);

        let records: Vec<HourlyRecord> = (0..24)
            .map(|hour| {
                let solar_kw = self.solar_kw(&mut rng, hour);
                let demand = self
                    .catalog
                    .buildings()
                    .iter()
                    .map(|building| BuildingDemand {
                        building: building.name.clone(),
                        demand_kw: building_demand_kw(&mut rng, building, hour),
                    })
                    .collect();
                HourlyRecord::new(hour, solar_kw, demand, battery_soc(hour))
            })
            .collect();

        debug!(
            buildings = self.catalog.len(),
            capacity_kw = self.solar_capacity_kw,
            "generated hourly profile"
        );
        records
    }

    fn solar_kw<R: Rng>(&self, rng: &mut R, hour: u32) -> f64 {
        let fraction = daylight_fraction(hour);
        if fraction == 0.0 {
            return 0.0;
        }
        self.solar_capacity_kw * fraction * rng.gen_range(0.9..=1.1)
    }
}

fn building_demand_kw<R: Rng>(rng: &mut R, building: &Building, hour: u32) -> f64 {
    let multiplier = match Daypart::for_hour(hour) {
        Daypart::Day => DAY_MULTIPLIER,
        Daypart::Evening => building.peak_factor,
        Daypart::Night => NIGHT_MULTIPLIER,
    };
    building.base_energy_kw * multiplier * rng.gen_range(0.85..=1.15)
}

/// Display-only state of charge: a smooth daily swing between 20 % and 80 %.
///
/// Not derived from the energy balance.
pub fn battery_soc(hour: u32) -> f64 {
    50.0 + 30.0 * ((hour as f64 - 6.0) / 24.0 * 2.0 * PI).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(base: f64, peak: f64) -> HourlyProfileGenerator {
        let buildings = vec![Building::new("Library", base, peak)];
        HourlyProfileGenerator::from_buildings(buildings, 500.0, Some(42)).unwrap()
    }

    #[test]
    fn test_generates_24_hours() {
        let profile = HourlyProfileGenerator::new(BuildingCatalog::default(), 500.0, Some(1))
            .unwrap()
            .generate();
        assert_eq!(profile.len(), 24);
        for (hour, record) in profile.iter().enumerate() {
            assert_eq!(record.hour as usize, hour);
            assert_eq!(record.building_demand.len(), 5);
        }
    }

    #[test]
    fn test_evening_demand_uses_peak_factor() {
        let profile = single(1000.0, 1.5).generate();
        let evening = profile[20].total_demand_kw;
        assert!((1275.0 - 1e-6..=1725.0 + 1e-6).contains(&evening), "evening demand {evening}");
    }

    #[test]
    fn test_hour_18_is_evening() {
        let profile = single(1000.0, 3.0).generate();
        // daytime tops out at 920, evening starts at 2550
        assert!(profile[18].total_demand_kw >= 2550.0 - 1e-6);
        assert!(profile[17].total_demand_kw <= 920.0 + 1e-6);
    }

    #[test]
    fn test_night_demand_band() {
        let profile = single(1000.0, 1.5).generate();
        for hour in 0..8 {
            let demand = profile[hour].total_demand_kw;
            assert!((255.0 - 1e-6..=345.0 + 1e-6).contains(&demand), "hour {hour}: {demand}");
        }
    }

    #[test]
    fn test_solar_gated_to_daylight() {
        let profile = single(100.0, 1.2).generate();
        for record in &profile {
            if record.hour < 6 || record.hour > 18 {
                assert_eq!(record.solar_kw, 0.0);
            } else {
                assert!(record.solar_kw >= 0.0);
            }
        }
        assert!(profile[12].solar_kw >= 450.0);
    }

    #[test]
    fn test_rejects_empty_catalog_and_bad_capacity() {
        assert!(HourlyProfileGenerator::from_buildings(Vec::new(), 500.0, None).is_err());
        assert!(HourlyProfileGenerator::new(BuildingCatalog::default(), f64::NAN, None).is_err());
        assert!(HourlyProfileGenerator::new(BuildingCatalog::default(), -1.0, None).is_err());
    }

    #[test]
    fn test_battery_soc_bounds() {
        for hour in 0..24 {
            let soc = battery_soc(hour);
            assert!((20.0 - 1e-9..=80.0 + 1e-9).contains(&soc));
        }
        assert!((battery_soc(12) - 80.0).abs() < 1e-9);
    }
}
