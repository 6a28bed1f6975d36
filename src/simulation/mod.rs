//! # Campus Data Simulation
//!
//! Seeded generators for the synthetic campus datasets.
//!
//! ## Components
//!
//! - **Daily**: ten-year seasonal weather and resource series, one row per calendar day
//! - **Hourly**: representative-day solar output and per-building demand
//! - **Sensors**: point-in-time snapshot across solar, air, water, waste and thermal sensors
//! - **Live**: current campus conditions for a chosen weather and activity level
//! - **Cache**: per-session memoization of generated tables
//!
//! ## Usage
//!
//! ```rust
//! use campus_sustainability::simulation::{SeasonalDailySeriesGenerator, SeriesParams};
//!
//! let generator = SeasonalDailySeriesGenerator::new(Some(42));
//! let series = generator.generate(&SeriesParams::default()).unwrap();
//! assert_eq!(series.len(), 3650);
//! ```
//!
//! Every generator takes an optional seed. The same seed and parameters always
//! produce the same table; `None` draws a fresh sequence from OS entropy.

pub mod cache;
pub mod daily;
pub mod hourly;
pub mod live;
pub mod sensors;
pub mod solar;

pub use cache::{SeriesCache, Session, SessionRegistry};
pub use daily::{SeasonBaseline, SeasonalDailySeriesGenerator, SeriesParams};
pub use hourly::HourlyProfileGenerator;
pub use live::{
    simulate_live, EnergyFlow, LiveConditions, LiveParams, LivePoint, WeatherCondition,
};
pub use sensors::InstantaneousSensorSampler;
pub use solar::{daylight_fraction, is_daylight};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Per-component offsets applied to a session seed.
pub const DAILY_STREAM: u64 = 0;
pub const HOURLY_STREAM: u64 = 1;
pub const SENSOR_STREAM: u64 = 2;
pub const PREDICTION_STREAM: u64 = 3;

/// Seed for one component, so components sharing a session seed draw
/// independent sequences.
pub fn component_seed(seed: Option<u64>, stream: u64) -> Option<u64> {
    seed.map(|seed| seed.wrapping_add(stream))
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
