//! Test fixtures for tour-planner.
//!
//! Real city coordinates (rounded to four decimals) grouped by region.

pub mod cities;

pub use cities::*;
