//! # Quantity Derivation Engine
//!
//! Turns one [`BuildingParameters`] into one [`QuantityReport`].
//!
//! The engine is a pure function: no I/O, no shared state, and identical input
//! always produces bit-identical output. It never fails on a validated record;
//! degenerate inputs (zero spacing, zero unit size) are substituted inside the
//! estimators, and inconsistent results such as a negative net façade area are
//! passed through unchanged.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::engine;
//! use takeoff_core::parameters::*;
//!
//! let params = BuildingParameters {
//!     length: 20.0,
//!     width: 10.0,
//!     height_per_story: 3.0,
//!     num_stories: 5,
//!     num_vertical_modules: 0,
//!     col_spacing_length: 5.0,
//!     col_spacing_width: 5.0,
//!     partition_mode: PartitionMode::Factor { partition_density_factor: 0.3 },
//!     wwr_mode: WwrMode::Simple { wwr_general: 0.4 },
//! };
//!
//! let report = engine::derive(&params);
//! assert_eq!(report.gross_floor_area, 1000.0);
//! assert_eq!(report.exterior_wall_area_net, report.exterior_wall_area_gross - report.window_area);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calculations::{circulation, facade, partitions, structural_grid};
use crate::calculations::{CirculationResult, FacadeResult, GridResult, PartitionResult};
use crate::parameters::BuildingParameters;
use crate::report::QuantityReport;

/// A report together with the estimator results it was assembled from.
///
/// Template tokens and detailed views read the breakdowns; the report alone
/// is what the tabular export consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivation {
    pub report: QuantityReport,
    pub grid: GridResult,
    pub facade: FacadeResult,
    pub circulation: CirculationResult,
    pub partitions: PartitionResult,
}

/// Derive the full quantity report for one building.
pub fn derive(params: &BuildingParameters) -> QuantityReport {
    derive_detailed(params).report
}

/// Derive the report and keep every estimator's breakdown.
pub fn derive_detailed(params: &BuildingParameters) -> Derivation {
    let first_floor_area = params.first_floor_area();
    let gross_floor_area = params.gross_floor_area();
    let upper_levels_area = if params.num_stories > 1 {
        first_floor_area * f64::from(params.num_stories - 1)
    } else {
        0.0
    };

    let grid = structural_grid::calculate(params);
    let facade = facade::calculate(params);
    let circulation = circulation::calculate(params);
    let partitions = partitions::calculate(params);
    trace!(?grid, ?facade, ?circulation, ?partitions, "estimator results");

    let report = QuantityReport {
        first_floor_area,
        roof_area: first_floor_area,
        upper_levels_area,
        gross_floor_area,
        exterior_wall_area_gross: facade.gross_wall_area,
        window_area: facade.window_area,
        exterior_wall_area_net: facade.net_wall_area,
        vertical_circulation_area: circulation.total_area,
        interior_wall_area: partitions.interior_wall_area,
        interior_wall_linear_meters: partitions.total_linear_meters,
        total_units: partitions.total_units,
        column_count: grid.column_count,
        column_linear_meters: grid.column_linear_meters,
        beam_linear_meters: grid.beam_linear_meters,
    };
    debug!(
        gross_floor_area = report.gross_floor_area,
        window_area = report.window_area,
        column_count = report.column_count,
        total_units = report.total_units,
        "derived quantity report"
    );

    Derivation {
        report,
        grid,
        facade,
        circulation,
        partitions,
    }
}

/// Derive reports for many buildings in parallel.
///
/// Output order matches input order, and each element equals what
/// [`derive`] returns for the same parameters.
pub fn derive_batch(batch: &[BuildingParameters]) -> Vec<QuantityReport> {
    debug!(count = batch.len(), "deriving batch");
    batch.par_iter().map(derive).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::fixtures::{scenario_a, scenario_d};
    use crate::parameters::{
        BuildingUse, CorridorPosition, LayoutParameters, OrientationRatios, PartitionMode, WwrMode,
    };
    use proptest::prelude::*;

    #[test]
    fn test_scenario_a() {
        let report = derive(&scenario_a());
        assert_eq!(report.first_floor_area, 200.0);
        assert_eq!(report.roof_area, 200.0);
        assert_eq!(report.upper_levels_area, 800.0);
        assert_eq!(report.gross_floor_area, 1000.0);
        assert!((report.exterior_wall_area_gross - 900.0).abs() < 1e-9);
        assert!((report.window_area - 360.0).abs() < 1e-9);
        assert!((report.exterior_wall_area_net - 540.0).abs() < 1e-9);
        assert_eq!(report.column_count, 15);
        assert_eq!(report.total_units, 0);
    }

    #[test]
    fn test_scenario_b_orientation_reduces_to_simple() {
        let simple = derive(&scenario_a());
        let mut params = scenario_a();
        params.wwr_mode = WwrMode::ByOrientation(OrientationRatios::uniform(0.4));
        let oriented = derive(&params);

        assert!((oriented.window_area - 360.0).abs() < 1e-9);
        assert!((oriented.window_area - simple.window_area).abs() < 1e-9);
    }

    #[test]
    fn test_scenario_c_zero_spacing() {
        let mut params = scenario_a();
        params.col_spacing_length = 0.0;
        let derivation = derive_detailed(&params);
        assert_eq!(derivation.grid.columns_along_length, 21);
        assert!(derivation.report.column_count > 0);
        assert!(derivation.report.column_linear_meters.is_finite());
    }

    #[test]
    fn test_scenario_d_layout() {
        let report = derive(&scenario_d());
        assert_eq!(report.first_floor_area, 800.0);
        assert_eq!(report.total_units, 30);
        assert!((report.interior_wall_linear_meters - 810.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_story_has_no_upper_levels() {
        let mut params = scenario_a();
        params.num_stories = 1;
        let report = derive(&params);
        assert_eq!(report.upper_levels_area, 0.0);
        assert_eq!(report.gross_floor_area, report.first_floor_area);
    }

    #[test]
    fn test_negative_net_area_is_not_corrected() {
        let mut params = scenario_a();
        params.wwr_mode = WwrMode::ByOrientation(OrientationRatios::uniform(1.2));
        let report = derive(&params);
        assert!(report.exterior_wall_area_net < 0.0);
        assert_eq!(
            report.exterior_wall_area_net,
            report.exterior_wall_area_gross - report.window_area
        );
    }

    #[test]
    fn test_tiny_spacing_derives_saturated_counts() {
        let mut params = scenario_a();
        params.length = 200.0;
        params.width = 200.0;
        params.col_spacing_length = 1e-9;
        params.col_spacing_width = 1e-9;

        let report = derive(&params);
        assert_eq!(report.column_count, u64::MAX);
        assert!(report.column_linear_meters.is_finite());
        assert!(report.beam_linear_meters.is_finite());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let batch = vec![scenario_a(), scenario_d(), scenario_a()];
        let reports = derive_batch(&batch);
        assert_eq!(reports.len(), 3);
        for (params, report) in batch.iter().zip(reports.iter()) {
            assert_eq!(&derive(params), report);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(derive_batch(&[]).is_empty());
    }

    fn arb_partition_mode() -> impl Strategy<Value = PartitionMode> {
        prop_oneof![
            (0.0..1.0f64).prop_map(|factor| PartitionMode::Factor {
                partition_density_factor: factor
            }),
            (
                prop::sample::select(BuildingUse::ALL.to_vec()),
                prop::sample::select(vec![
                    CorridorPosition::Middle,
                    CorridorPosition::North,
                    CorridorPosition::South
                ]),
                0.0..5.0f64,
                0.0..20.0f64,
            )
                .prop_map(|(building_use, corridor_position, corridor_width, bathroom_perimeter)| {
                    PartitionMode::Layout(LayoutParameters {
                        building_use,
                        corridor_position,
                        corridor_width,
                        bathroom_perimeter,
                    })
                }),
        ]
    }

    fn arb_wwr_mode() -> impl Strategy<Value = WwrMode> {
        prop_oneof![
            (0.0..=1.0f64).prop_map(|wwr_general| WwrMode::Simple { wwr_general }),
            (0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64, 0.0..=1.0f64).prop_map(
                |(north, south, east, west)| WwrMode::ByOrientation(OrientationRatios {
                    north,
                    south,
                    east,
                    west,
                })
            ),
        ]
    }

    prop_compose! {
        fn arb_params()(
            length in 1.0..200.0f64,
            width in 1.0..200.0f64,
            height_per_story in 2.0..6.0f64,
            num_stories in 1u32..60,
            num_vertical_modules in 0u32..6,
            col_spacing_length in 0.0..12.0f64,
            col_spacing_width in 0.0..12.0f64,
            partition_mode in arb_partition_mode(),
            wwr_mode in arb_wwr_mode(),
        ) -> BuildingParameters {
            BuildingParameters {
                length,
                width,
                height_per_story,
                num_stories,
                num_vertical_modules,
                col_spacing_length,
                col_spacing_width,
                partition_mode,
                wwr_mode,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_net_wall_area_identity(params in arb_params()) {
            let report = derive(&params);
            prop_assert_eq!(
                report.exterior_wall_area_gross - report.window_area,
                report.exterior_wall_area_net
            );
            // Ratios within [0, 1] never glaze more than the wall, up to rounding
            prop_assert!(report.exterior_wall_area_net >= -1e-9 * report.exterior_wall_area_gross);
        }

        #[test]
        fn prop_single_story_has_no_upper_levels(mut params in arb_params()) {
            params.num_stories = 1;
            prop_assert_eq!(derive(&params).upper_levels_area, 0.0);
        }

        #[test]
        fn prop_no_modules_no_circulation(mut params in arb_params()) {
            params.num_vertical_modules = 0;
            prop_assert_eq!(derive(&params).vertical_circulation_area, 0.0);
        }

        #[test]
        fn prop_factor_mode_has_no_units(mut params in arb_params(), factor in 0.0..1.0f64) {
            params.partition_mode = PartitionMode::Factor { partition_density_factor: factor };
            prop_assert_eq!(derive(&params).total_units, 0);
        }

        #[test]
        fn prop_derivation_is_deterministic(params in arb_params()) {
            let first = derive(&params);
            let second = derive(&params);
            prop_assert_eq!(first.window_area.to_bits(), second.window_area.to_bits());
            prop_assert_eq!(first.interior_wall_area.to_bits(), second.interior_wall_area.to_bits());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_grid_counts_are_positive(params in arb_params()) {
            let report = derive(&params);
            prop_assert!(report.column_count >= 1);
            prop_assert!(report.column_linear_meters.is_finite());
            prop_assert!(report.beam_linear_meters.is_finite());
        }
    }
}
