use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{GenerationError, GenerationResult};

/// Static reference data for one campus building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub name: String,
    /// Built-up floor area in m²
    pub area_m2: f64,
    pub floors: u32,
    pub students: u32,
    /// Nominal electrical load in kW
    pub base_energy_kw: f64,
    /// Evening demand multiplier applied to `base_energy_kw`
    pub peak_factor: f64,
}

impl Building {
    pub fn new(name: impl Into<String>, base_energy_kw: f64, peak_factor: f64) -> Self {
        Self {
            name: name.into(),
            area_m2: 0.0,
            floors: 1,
            students: 0,
            base_energy_kw,
            peak_factor,
        }
    }

    pub fn validate(&self) -> GenerationResult<()> {
        if self.name.trim().is_empty() {
            return Err(GenerationError::invalid("building name must not be empty"));
        }
        if !self.base_energy_kw.is_finite() || self.base_energy_kw < 0.0 {
            return Err(GenerationError::invalid(format!(
                "building '{}' has invalid base energy {}",
                self.name, self.base_energy_kw
            )));
        }
        if !self.peak_factor.is_finite() || self.peak_factor < 0.0 {
            return Err(GenerationError::invalid(format!(
                "building '{}' has invalid peak factor {}",
                self.name, self.peak_factor
            )));
        }
        Ok(())
    }

    /// Lowercase ASCII slug of the name, e.g. `admin_block`.
    pub fn slug(&self) -> String {
        slugify(&self.name)
    }
}

pub(crate) fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .join("_")
}

/// Read-only catalog of campus buildings, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BuildingCatalog {
    buildings: Vec<Building>,
}

impl BuildingCatalog {
    /// Build a catalog, rejecting an empty list, an invalid entry, or two
    /// buildings whose names or slugs collide.
    pub fn new(buildings: Vec<Building>) -> GenerationResult<Self> {
        if buildings.is_empty() {
            return Err(GenerationError::invalid("building catalog must not be empty"));
        }
        let mut names = HashSet::new();
        let mut slugs = HashSet::new();
        for building in &buildings {
            building.validate()?;
            if !names.insert(building.name.as_str()) {
                return Err(GenerationError::invalid(format!(
                    "duplicate building name '{}'",
                    building.name
                )));
            }
            let slug = building.slug();
            if slug.is_empty() || !slugs.insert(slug.clone()) {
                return Err(GenerationError::invalid(format!(
                    "building '{}' maps to column slug '{slug}', which is empty or already used",
                    building.name
                )));
            }
        }
        Ok(Self { buildings })
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buildings.iter().map(|b| b.name.as_str())
    }
}

/// The demo campus: five buildings spanning the main load types.
pub fn default_buildings() -> Vec<Building> {
    vec![
        Building {
            name: "Admin Block".to_string(),
            area_m2: 4_200.0,
            floors: 4,
            students: 300,
            base_energy_kw: 180.0,
            peak_factor: 1.2,
        },
        Building {
            name: "Library".to_string(),
            area_m2: 3_600.0,
            floors: 3,
            students: 800,
            base_energy_kw: 150.0,
            peak_factor: 1.4,
        },
        Building {
            name: "Science Block".to_string(),
            area_m2: 6_800.0,
            floors: 5,
            students: 1_500,
            base_energy_kw: 320.0,
            peak_factor: 1.3,
        },
        Building {
            name: "Hostel".to_string(),
            area_m2: 9_500.0,
            floors: 6,
            students: 1_200,
            base_energy_kw: 260.0,
            peak_factor: 1.8,
        },
        Building {
            name: "Sports Complex".to_string(),
            area_m2: 5_000.0,
            floors: 2,
            students: 400,
            base_energy_kw: 120.0,
            peak_factor: 1.5,
        },
    ]
}

impl Default for BuildingCatalog {
    fn default() -> Self {
        Self {
            buildings: default_buildings(),
        }
    }
}
