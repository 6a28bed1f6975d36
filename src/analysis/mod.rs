//! Filtering and aggregation over generated daily tables.

pub mod filter;
pub mod summary;

pub use filter::*;
pub use summary::*;
