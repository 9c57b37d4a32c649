//! # Façade Estimate
//!
//! Gross exterior wall area, glazing and net opaque wall area.
//!
//! Gross wall area is perimeter × total height. Window area depends on the
//! [`WwrMode`]:
//!
//! - **Simple**: gross area × general ratio
//! - **ByOrientation**: each façade's gross area × its own ratio, summed.
//!   North and South are the `length` walls, East and West the `width` walls.
//!
//! Net area is gross minus windows and is never clamped: a ratio above 1
//! yields a negative net area, which signals bad input to the caller.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::parameters::{BuildingParameters, Orientation, WwrMode};

/// Quantities for one façade.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FacadeSide {
    /// Which façade
    pub orientation: Orientation,
    /// Façade length in plan (m)
    pub length: f64,
    /// Façade length × total height (m²)
    pub gross_area: f64,
    /// Window-to-wall ratio applied to this façade
    pub wwr: f64,
}

/// Results from the façade estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacadeResult {
    /// Exterior perimeter (m)
    pub perimeter: f64,

    /// Perimeter × total height (m²)
    pub gross_wall_area: f64,

    /// Glazed area (m²)
    pub window_area: f64,

    /// Gross minus glazing (m²); may be negative for ratios above 1
    pub net_wall_area: f64,

    /// Per-façade breakdown in N, S, E, W order
    pub sides: [FacadeSide; 4],
}

impl FacadeResult {
    /// Breakdown for one orientation
    pub fn side(&self, orientation: Orientation) -> &FacadeSide {
        match orientation {
            Orientation::North => &self.sides[0],
            Orientation::South => &self.sides[1],
            Orientation::East => &self.sides[2],
            Orientation::West => &self.sides[3],
        }
    }
}

/// Estimate façade quantities.
pub fn calculate(params: &BuildingParameters) -> FacadeResult {
    let total_height = params.total_height();
    let perimeter = params.perimeter();
    let gross_wall_area = perimeter * total_height;

    let sides = Orientation::ALL.map(|orientation| {
        let length = orientation.facade_length(params);
        FacadeSide {
            orientation,
            length,
            gross_area: length * total_height,
            wwr: params.wwr_mode.ratio(orientation),
        }
    });

    let window_area = match &params.wwr_mode {
        WwrMode::Simple { wwr_general } => gross_wall_area * wwr_general,
        WwrMode::ByOrientation(_) => sides.iter().map(|side| side.gross_area * side.wwr).sum::<f64>(),
    };

    let net_wall_area = gross_wall_area - window_area;
    if net_wall_area < 0.0 {
        warn!(
            gross_wall_area,
            window_area, "window area exceeds gross wall area; check window-to-wall ratios"
        );
    }

    FacadeResult {
        perimeter,
        gross_wall_area,
        window_area,
        net_wall_area,
        sides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::fixtures::scenario_a;
    use crate::parameters::OrientationRatios;

    #[test]
    fn test_simple_wwr() {
        let facade = calculate(&scenario_a());
        assert!((facade.perimeter - 60.0).abs() < 1e-9);
        assert!((facade.gross_wall_area - 900.0).abs() < 1e-9);
        assert!((facade.window_area - 360.0).abs() < 1e-9);
        assert!((facade.net_wall_area - 540.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_orientation_matches_simple() {
        let simple = calculate(&scenario_a());

        let mut params = scenario_a();
        params.wwr_mode = WwrMode::ByOrientation(OrientationRatios::uniform(0.4));
        let oriented = calculate(&params);

        assert!((oriented.window_area - simple.window_area).abs() < 1e-9);
        assert!((oriented.window_area - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_north_south_are_length_walls() {
        let mut params = scenario_a();
        params.wwr_mode = WwrMode::ByOrientation(OrientationRatios {
            north: 1.0,
            south: 0.0,
            east: 0.0,
            west: 0.0,
        });
        let facade = calculate(&params);
        // Only the North wall: 20 m × 15 m
        assert!((facade.window_area - 300.0).abs() < 1e-9);
        assert!((facade.side(Orientation::North).gross_area - 300.0).abs() < 1e-9);
        assert!((facade.side(Orientation::East).gross_area - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_mixed_orientation_ratios() {
        let mut params = scenario_a();
        params.wwr_mode = WwrMode::ByOrientation(OrientationRatios {
            north: 0.3,
            south: 0.5,
            east: 0.4,
            west: 0.2,
        });
        let facade = calculate(&params);
        // 300 × 0.3 + 300 × 0.5 + 150 × 0.4 + 150 × 0.2
        assert!((facade.window_area - 330.0).abs() < 1e-9);
        assert_eq!(facade.net_wall_area, facade.gross_wall_area - facade.window_area);
    }

    #[test]
    fn test_sides_sum_to_gross() {
        let facade = calculate(&scenario_a());
        let sum: f64 = facade.sides.iter().map(|s| s.gross_area).sum();
        assert!((sum - facade.gross_wall_area).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_above_one_is_not_clamped() {
        let mut params = scenario_a();
        params.wwr_mode = WwrMode::Simple { wwr_general: 1.5 };
        let facade = calculate(&params);
        assert!(facade.net_wall_area < 0.0);
        assert!((facade.net_wall_area + 450.0).abs() < 1e-9);
    }
}
