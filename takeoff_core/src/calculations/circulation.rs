//! # Vertical Circulation Estimate
//!
//! Floor area taken by stair/elevator cores, sized from an empirical stair run:
//! `(height_per_story / riser) × tread × flights + landing allowance` gives
//! the core length per story, which is then carried over the full building
//! height. Without cores or story height the area is exactly zero.

use serde::{Deserialize, Serialize};

use crate::parameters::BuildingParameters;

/// Stair riser height (m)
pub const STAIR_RISER_M: f64 = 0.17;

/// Stair tread depth (m)
pub const STAIR_TREAD_M: f64 = 0.30;

/// Flights per story
pub const FLIGHTS_PER_STORY: f64 = 2.0;

/// Landing and shaft allowance added to each core's run (m)
pub const LANDING_ALLOWANCE_M: f64 = 4.8;

/// Results from the circulation estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CirculationResult {
    /// Core plan length per story for one module (m)
    pub length_per_story_per_module: f64,

    /// Area for one module over the building height (m²)
    pub area_per_module: f64,

    /// Area for all modules (m²)
    pub total_area: f64,
}

/// Core plan length per story for one module.
pub fn length_per_story(height_per_story: f64) -> f64 {
    (height_per_story / STAIR_RISER_M) * STAIR_TREAD_M * FLIGHTS_PER_STORY + LANDING_ALLOWANCE_M
}

/// Estimate vertical circulation area.
pub fn calculate(params: &BuildingParameters) -> CirculationResult {
    if params.num_vertical_modules == 0 || params.height_per_story <= 0.0 {
        return CirculationResult::default();
    }

    let length_per_story_per_module = length_per_story(params.height_per_story);
    let area_per_module = length_per_story_per_module * params.total_height();

    CirculationResult {
        length_per_story_per_module,
        area_per_module,
        total_area: area_per_module * f64::from(params.num_vertical_modules),
    }
}
