//! # Interior Partition Estimate
//!
//! Linear meters and area of interior walls under one of two strategies.
//!
//! ## Factor mode
//!
//! `gross floor area × density factor` linear meters. Units are not estimated
//! and are reported as zero.
//!
//! ## Layout mode
//!
//! A bottom-up estimate for one typical story, scaled by the story count:
//!
//! 1. Net usable area = floor plate − corridor (`length × corridor_width`), floored at 0
//! 2. Units = `floor(net usable area / unit size)` for the building use
//! 3. Corridor walls: two full-length walls for a middle (double-loaded)
//!    corridor, one for a North or South (single-loaded) corridor
//! 4. Bathroom walls: units × bathrooms per unit × bathroom perimeter
//! 5. Demising walls: units × average unit depth, where the depth is
//!    `(width − corridor_width) / 2` floored at 0 for every corridor position
//!
//! In both modes the wall area uses the story height, not the building height:
//! partitions span floor to floor.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::partitions;
//! # use takeoff_core::parameters::*;
//! # let params = BuildingParameters {
//! #     length: 40.0, width: 20.0, height_per_story: 3.0, num_stories: 3,
//! #     num_vertical_modules: 0, col_spacing_length: 8.0, col_spacing_width: 5.0,
//! #     partition_mode: PartitionMode::Layout(LayoutParameters {
//! #         building_use: BuildingUse::Residential,
//! #         corridor_position: CorridorPosition::Middle,
//! #         corridor_width: 2.0,
//! #         bathroom_perimeter: 10.0,
//! #     }),
//! #     wwr_mode: WwrMode::Simple { wwr_general: 0.4 },
//! # };
//!
//! let result = partitions::calculate(&params);
//! assert_eq!(result.units_per_story, 10);
//! assert_eq!(result.total_units, 30);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parameters::{BuildingParameters, LayoutParameters, PartitionMode};

/// Unit size substituted for a zero (or otherwise non-positive) unit size (m²)
pub const FALLBACK_UNIT_SIZE_M2: f64 = 1.0;

/// Per-story wall breakdown for layout mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBreakdown {
    /// Floor plate minus corridor, floored at 0 (m²)
    pub net_usable_area_per_story: f64,

    /// Unit size used for the division (m²)
    pub unit_size: f64,

    /// Average unit depth used for demising walls (m)
    pub avg_unit_depth: f64,

    /// Corridor walls (m)
    pub corridor_wall_lm_per_story: f64,

    /// Bathroom module walls (m)
    pub bathroom_wall_lm_per_story: f64,

    /// Walls between units (m)
    pub demising_wall_lm_per_story: f64,
}

/// Results from the partition estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionResult {
    /// Interior wall length on one story (m)
    pub linear_meters_per_story: f64,

    /// Interior wall length for the building (m)
    pub total_linear_meters: f64,

    /// Total linear meters × height per story (m²)
    pub interior_wall_area: f64,

    /// Units on one story (0 in factor mode)
    pub units_per_story: u64,

    /// Units in the building (0 in factor mode)
    pub total_units: u64,

    /// Per-story breakdown, present in layout mode only
    pub layout: Option<LayoutBreakdown>,
}

/// Unit size used for the division: non-positive sizes fall back to
/// [`FALLBACK_UNIT_SIZE_M2`].
pub fn effective_unit_size(unit_size: f64) -> f64 {
    if unit_size > 0.0 {
        unit_size
    } else {
        FALLBACK_UNIT_SIZE_M2
    }
}

/// Whole units that fit in a net usable area. Saturates at `u64::MAX`.
pub fn units_in(net_usable_area: f64, unit_size: f64) -> u64 {
    (net_usable_area.max(0.0) / effective_unit_size(unit_size)).floor() as u64
}

/// Estimate interior partitions.
pub fn calculate(params: &BuildingParameters) -> PartitionResult {
    let stories = f64::from(params.num_stories);

    let (linear_meters_per_story, total_linear_meters, units_per_story, layout) =
        match &params.partition_mode {
            PartitionMode::Factor {
                partition_density_factor,
            } => (
                params.first_floor_area() * partition_density_factor,
                params.gross_floor_area() * partition_density_factor,
                0,
                None,
            ),
            PartitionMode::Layout(layout) => {
                let (units, breakdown) = layout_story(params, layout);
                let per_story = breakdown.corridor_wall_lm_per_story
                    + breakdown.bathroom_wall_lm_per_story
                    + breakdown.demising_wall_lm_per_story;
                (per_story, per_story * stories, units, Some(breakdown))
            }
        };

    PartitionResult {
        linear_meters_per_story,
        total_linear_meters,
        interior_wall_area: total_linear_meters * params.height_per_story,
        units_per_story,
        total_units: units_per_story.saturating_mul(u64::from(params.num_stories)),
        layout,
    }
}

fn layout_story(params: &BuildingParameters, layout: &LayoutParameters) -> (u64, LayoutBreakdown) {
    let use_type = layout.building_use;

    let corridor_area = params.length * layout.corridor_width;
    let net_usable_area_per_story = (params.first_floor_area() - corridor_area).max(0.0);

    let unit_size = effective_unit_size(use_type.unit_size_m2());
    if unit_size != use_type.unit_size_m2() {
        warn!(building_use = %use_type, "non-positive unit size replaced with {} m²", FALLBACK_UNIT_SIZE_M2);
    }
    let units = units_in(net_usable_area_per_story, unit_size);
    let units_f = units as f64;

    let corridor_wall_lm_per_story =
        params.length * f64::from(layout.corridor_position.corridor_wall_count());
    let bathroom_wall_lm_per_story =
        units_f * f64::from(use_type.bathrooms_per_unit()) * layout.bathroom_perimeter;
    let avg_unit_depth = ((params.width - layout.corridor_width) / 2.0).max(0.0);
    let demising_wall_lm_per_story = units_f * avg_unit_depth;

    (
        units,
        LayoutBreakdown {
            net_usable_area_per_story,
            unit_size,
            avg_unit_depth,
            corridor_wall_lm_per_story,
            bathroom_wall_lm_per_story,
            demising_wall_lm_per_story,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::fixtures::{scenario_a, scenario_d};
    use crate::parameters::{BuildingUse, CorridorPosition};

    fn with_layout(mut params: BuildingParameters, edit: impl FnOnce(&mut LayoutParameters)) -> BuildingParameters {
        if let PartitionMode::Layout(layout) = &mut params.partition_mode {
            edit(layout);
        }
        params
    }

    #[test]
    fn test_factor_mode() {
        let result = calculate(&scenario_a());
        // GFA 1000 × 0.3
        assert!((result.total_linear_meters - 300.0).abs() < 1e-9);
        assert!((result.interior_wall_area - 900.0).abs() < 1e-9);
        assert_eq!(result.total_units, 0);
        assert_eq!(result.units_per_story, 0);
        assert!(result.layout.is_none());
    }

    #[test]
    fn test_scenario_d_units() {
        let result = calculate(&scenario_d());
        let layout = result.layout.unwrap();
        assert!((layout.net_usable_area_per_story - 720.0).abs() < 1e-9);
        assert_eq!(result.units_per_story, 10);
        assert_eq!(result.total_units, 30);
    }

    #[test]
    fn test_scenario_d_walls() {
        let result = calculate(&scenario_d());
        let layout = result.layout.unwrap();
        // Middle corridor: 2 × 40
        assert!((layout.corridor_wall_lm_per_story - 80.0).abs() < 1e-9);
        // 10 units × 1 bath × 10 m
        assert!((layout.bathroom_wall_lm_per_story - 100.0).abs() < 1e-9);
        // (20 − 2) / 2 = 9 m depth × 10 units
        assert!((layout.avg_unit_depth - 9.0).abs() < 1e-9);
        assert!((layout.demising_wall_lm_per_story - 90.0).abs() < 1e-9);

        assert!((result.linear_meters_per_story - 270.0).abs() < 1e-9);
        assert!((result.total_linear_meters - 810.0).abs() < 1e-9);
        // Story height, not building height
        assert!((result.interior_wall_area - 2430.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_loaded_corridor() {
        for position in [CorridorPosition::North, CorridorPosition::South] {
            let params = with_layout(scenario_d(), |l| l.corridor_position = position);
            let layout = calculate(&params).layout.unwrap();
            assert!((layout.corridor_wall_lm_per_story - 40.0).abs() < 1e-9);
            // Average depth proxy is the same for every corridor position
            assert!((layout.avg_unit_depth - 9.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_huge_floor_plate_saturates_units() {
        let mut params = scenario_d();
        params.length = 1e12;
        params.width = 1e12;
        let result = calculate(&params);

        assert_eq!(result.units_per_story, u64::MAX);
        assert_eq!(result.total_units, u64::MAX);
        assert!(result.total_linear_meters.is_finite());
    }

    #[test]
    fn test_office_use() {
        let params = with_layout(scenario_d(), |l| l.building_use = BuildingUse::Office);
        let result = calculate(&params);
        // floor(720 / 80) = 9 units, 2 baths each
        assert_eq!(result.units_per_story, 9);
        let layout = result.layout.unwrap();
        assert!((layout.bathroom_wall_lm_per_story - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_commercial_use() {
        let params = with_layout(scenario_d(), |l| l.building_use = BuildingUse::Commercial);
        let result = calculate(&params);
        // floor(720 / 50) = 14
        assert_eq!(result.units_per_story, 14);
        assert_eq!(result.total_units, 42);
    }

    #[test]
    fn test_corridor_wider_than_plan_floors_at_zero() {
        let params = with_layout(scenario_d(), |l| l.corridor_width = 30.0);
        let result = calculate(&params);
        let layout = result.layout.unwrap();
        // 800 − 1200 → 0
        assert_eq!(layout.net_usable_area_per_story, 0.0);
        assert_eq!(layout.avg_unit_depth, 0.0);
        assert_eq!(result.total_units, 0);
        // Corridor walls remain
        assert!((result.linear_meters_per_story - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_unit_size_treated_as_one() {
        assert_eq!(effective_unit_size(0.0), FALLBACK_UNIT_SIZE_M2);
        assert_eq!(units_in(720.0, 0.0), 720);
        assert_eq!(units_in(720.0, 71.5), 10);
        assert_eq!(units_in(-5.0, 71.5), 0);
    }
}
