//! # Structural Grid Estimate
//!
//! Column and beam quantities for a regular rectangular column grid.
//!
//! ## Assumptions
//!
//! - Columns sit on every grid line, including both plan edges
//!   (`floor(dimension / spacing) + 1` per axis)
//! - Every column runs the full building height
//! - One beam grid per occupied story: each floor above the ground is carried
//!   by the grid below it and the topmost grid carries the roof
//! - A zero grid spacing is treated as 1 m so the estimate never divides by zero
//! - Column counts saturate at `u64::MAX`; lengths are computed from the
//!   unsaturated line counts as `f64`
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::calculations::structural_grid;
//! # use takeoff_core::parameters::*;
//! # let params = BuildingParameters {
//! #     length: 20.0, width: 10.0, height_per_story: 3.0, num_stories: 5,
//! #     num_vertical_modules: 0, col_spacing_length: 5.0, col_spacing_width: 5.0,
//! #     partition_mode: PartitionMode::Factor { partition_density_factor: 0.3 },
//! #     wwr_mode: WwrMode::Simple { wwr_general: 0.4 },
//! # };
//!
//! let grid = structural_grid::calculate(&params);
//! assert_eq!(grid.columns_along_length, 5);
//! assert_eq!(grid.columns_along_width, 3);
//! assert_eq!(grid.column_count, 15);
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parameters::BuildingParameters;

/// Spacing substituted for a zero (or otherwise non-positive) grid pitch (m)
pub const FALLBACK_SPACING_M: f64 = 1.0;

/// Results from the structural grid estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResult {
    /// Grid pitch actually used along `length` (m)
    pub spacing_length: f64,

    /// Grid pitch actually used along `width` (m)
    pub spacing_width: f64,

    /// True when either supplied spacing was replaced by the fallback
    pub spacing_substituted: bool,

    /// Column lines along `length`
    pub columns_along_length: u64,

    /// Column lines along `width`
    pub columns_along_width: u64,

    /// Total columns (product of the per-axis counts)
    pub column_count: u64,

    /// Column count × total building height (m)
    pub column_linear_meters: f64,

    /// Beam length of one story's grid (m)
    pub beam_linear_meters_per_level: f64,

    /// Beam length over all stories (m)
    pub beam_linear_meters: f64,
}

/// Grid pitch used for a supplied spacing: non-positive values fall back to
/// [`FALLBACK_SPACING_M`].
pub fn effective_spacing(spacing: f64) -> f64 {
    if spacing > 0.0 {
        spacing
    } else {
        FALLBACK_SPACING_M
    }
}

/// Column lines along one axis, counting both end columns.
///
/// Saturates at `u64::MAX` for extreme dimension to spacing ratios.
pub fn columns_along(dimension: f64, spacing: f64) -> u64 {
    ((dimension / effective_spacing(spacing)).floor() as u64).saturating_add(1)
}

/// Column lines along one axis as a float, without saturation.
fn column_lines(dimension: f64, spacing: f64) -> f64 {
    (dimension / spacing).floor() + 1.0
}

/// Estimate columns and beams for the building.
pub fn calculate(params: &BuildingParameters) -> GridResult {
    let spacing_length = effective_spacing(params.col_spacing_length);
    let spacing_width = effective_spacing(params.col_spacing_width);
    let spacing_substituted =
        spacing_length != params.col_spacing_length || spacing_width != params.col_spacing_width;
    if spacing_substituted {
        warn!(
            col_spacing_length = params.col_spacing_length,
            col_spacing_width = params.col_spacing_width,
            "non-positive column spacing replaced with {} m",
            FALLBACK_SPACING_M
        );
    }

    let columns_along_length = columns_along(params.length, spacing_length);
    let columns_along_width = columns_along(params.width, spacing_width);
    let column_count = columns_along_length.saturating_mul(columns_along_width);

    let lines_along_length = column_lines(params.length, spacing_length);
    let lines_along_width = column_lines(params.width, spacing_width);
    let column_linear_meters = lines_along_length * lines_along_width * params.total_height();

    // Beams along `length` sit on each width-wise column line, and vice versa
    let beams_along_length = lines_along_width * params.length;
    let beams_along_width = lines_along_length * params.width;
    let beam_linear_meters_per_level = beams_along_length + beams_along_width;
    let beam_linear_meters = beam_linear_meters_per_level * f64::from(params.num_stories);

    GridResult {
        spacing_length,
        spacing_width,
        spacing_substituted,
        columns_along_length,
        columns_along_width,
        column_count,
        column_linear_meters,
        beam_linear_meters_per_level,
        beam_linear_meters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::fixtures::scenario_a;

    #[test]
    fn test_columns_include_both_ends() {
        assert_eq!(columns_along(20.0, 5.0), 5);
        assert_eq!(columns_along(10.0, 5.0), 3);
        // Partial bay does not add a column line
        assert_eq!(columns_along(22.0, 5.0), 5);
    }

    #[test]
    fn test_scenario_a_grid() {
        let grid = calculate(&scenario_a());
        assert_eq!(grid.columns_along_length, 5);
        assert_eq!(grid.columns_along_width, 3);
        assert_eq!(grid.column_count, 15);
        // 15 columns × 15 m
        assert!((grid.column_linear_meters - 225.0).abs() < 1e-9);
        // 3 × 20 + 5 × 10 = 110 per level, × 5 levels
        assert!((grid.beam_linear_meters_per_level - 110.0).abs() < 1e-9);
        assert!((grid.beam_linear_meters - 550.0).abs() < 1e-9);
        assert!(!grid.spacing_substituted);
    }

    #[test]
    fn test_zero_spacing_treated_as_one() {
        let mut params = scenario_a();
        params.col_spacing_length = 0.0;
        let grid = calculate(&params);

        assert_eq!(grid.spacing_length, FALLBACK_SPACING_M);
        assert!(grid.spacing_substituted);
        // 20 m at 1 m pitch
        assert_eq!(grid.columns_along_length, 21);
        assert_eq!(grid.columns_along_width, 3);
        assert_eq!(grid.column_count, 63);
        assert!(grid.column_linear_meters.is_finite());
    }

    #[test]
    fn test_zero_width_spacing_uses_its_own_axis() {
        let mut params = scenario_a();
        params.col_spacing_width = 0.0;
        let grid = calculate(&params);
        assert_eq!(grid.columns_along_length, 5);
        assert_eq!(grid.columns_along_width, 11);
    }

    #[test]
    fn test_columns_run_full_height_regardless_of_stories() {
        let mut params = scenario_a();
        params.num_stories = 1;
        let one = calculate(&params);
        params.num_stories = 10;
        let ten = calculate(&params);

        assert_eq!(one.column_count, ten.column_count);
        assert!((ten.column_linear_meters - 10.0 * one.column_linear_meters).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_spacing_saturates_counts() {
        let mut params = scenario_a();
        params.length = 200.0;
        params.width = 200.0;
        params.col_spacing_length = 1e-9;
        params.col_spacing_width = 1e-9;
        let grid = calculate(&params);

        assert!(!grid.spacing_substituted);
        assert_eq!(grid.column_count, u64::MAX);
        assert!(grid.columns_along_length > 100_000_000_000);
        // Lengths keep the true line counts: about 4e22 columns × 15 m
        assert!(grid.column_linear_meters.is_finite());
        assert!(grid.column_linear_meters > u64::MAX as f64 * 15.0);
        assert!(grid.beam_linear_meters.is_finite());
    }

    #[test]
    fn test_columns_along_saturates() {
        assert_eq!(columns_along(1e30, 1.0), u64::MAX);
    }

    #[test]
    fn test_single_story_has_one_beam_grid() {
        let mut params = scenario_a();
        params.num_stories = 1;
        let grid = calculate(&params);
        assert_eq!(grid.beam_linear_meters, grid.beam_linear_meters_per_level);
    }
}
