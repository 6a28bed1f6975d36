use serde::{Deserialize, Serialize};

/// Demand drawn by one building during an hour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDemand {
    pub building: String,
    pub demand_kw: f64,
}

/// One hour of the representative campus day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyRecord {
    pub hour: u32,
    pub solar_kw: f64,
    /// Per-building demand in catalog order
    pub building_demand: Vec<BuildingDemand>,
    pub total_demand_kw: f64,
    pub grid_import_kw: f64,
    /// Cosmetic state-of-charge curve in percent, not an energy balance
    pub battery_soc: f64,
}

impl HourlyRecord {
    /// Assemble a record, deriving the total and grid import from the parts.
    pub fn new(
        hour: u32,
        solar_kw: f64,
        building_demand: Vec<BuildingDemand>,
        battery_soc: f64,
    ) -> Self {
        let total_demand_kw = building_demand.iter().map(|d| d.demand_kw).sum::<f64>();
        let grid_import_kw = (total_demand_kw - solar_kw).max(0.0);
        Self {
            hour,
            solar_kw,
            building_demand,
            total_demand_kw,
            grid_import_kw,
            battery_soc,
        }
    }

    pub fn demand_for(&self, building: &str) -> Option<f64> {
        self.building_demand
            .iter()
            .find(|d| d.building == building)
            .map(|d| d.demand_kw)
    }
}

/// Part of the day used to pick a building's demand multiplier.
///
/// Daytime is half-open, so hour 18 belongs to the evening only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Daypart {
    /// 08:00 up to 18:00
    Day,
    /// 18:00 through 23:00
    Evening,
    Night,
}

impl Daypart {
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            8..=17 => Daypart::Day,
            18..=23 => Daypart::Evening,
            _ => Daypart::Night,
        }
    }
}
