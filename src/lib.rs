pub mod analysis;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod export;
pub mod forecast;
pub mod simulation;
pub mod state;
pub mod telemetry;

pub use error::{GenerationError, GenerationResult};
