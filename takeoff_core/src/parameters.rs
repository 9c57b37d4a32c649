//! # Building Parameters
//!
//! The validated input record consumed by the derivation engine. Mode-dependent
//! inputs are tagged variants: a [`PartitionMode::Factor`] carries only its
//! density factor and a [`PartitionMode::Layout`] carries only the layout
//! fields, so an invalid mode/field combination cannot be constructed.
//!
//! Values are assumed to be range-checked already (see
//! [`validation`](crate::validation)); nothing here re-validates.
//!
//! ## Orientation convention
//!
//! North and South façades are the walls running along `length`; East and
//! West façades are the walls running along `width`.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "length": 20.0,
//!   "width": 10.0,
//!   "height_per_story": 3.0,
//!   "num_stories": 5,
//!   "num_vertical_modules": 1,
//!   "col_spacing_length": 5.0,
//!   "col_spacing_width": 5.0,
//!   "partition_mode": { "mode": "factor", "partition_density_factor": 0.3 },
//!   "wwr_mode": { "mode": "simple", "wwr_general": 0.4 }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};

/// Immutable input record for one building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingParameters {
    /// Plan dimension along the North/South façades (m)
    pub length: f64,

    /// Plan dimension along the East/West façades (m)
    pub width: f64,

    /// Floor-to-floor height (m)
    pub height_per_story: f64,

    /// Occupied levels; the roof is an implicit extra level
    pub num_stories: u32,

    /// Stair/elevator cores
    pub num_vertical_modules: u32,

    /// Column grid pitch along `length` (m); zero is treated as 1
    pub col_spacing_length: f64,

    /// Column grid pitch along `width` (m); zero is treated as 1
    pub col_spacing_width: f64,

    /// Interior partition estimation strategy
    pub partition_mode: PartitionMode,

    /// Window-to-wall ratio strategy
    pub wwr_mode: WwrMode,
}

impl BuildingParameters {
    /// Total building height (height per story × stories)
    pub fn total_height(&self) -> f64 {
        self.height_per_story * f64::from(self.num_stories)
    }

    /// Footprint area of one floor plate
    pub fn first_floor_area(&self) -> f64 {
        self.length * self.width
    }

    /// Floor-plate area summed over all occupied stories (GFA)
    pub fn gross_floor_area(&self) -> f64 {
        self.first_floor_area() * f64::from(self.num_stories)
    }

    /// Exterior perimeter of the rectangular plan
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.length + self.width)
    }
}

/// Interior partition estimation strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PartitionMode {
    /// Linear meters of partition per m² of gross floor area
    Factor { partition_density_factor: f64 },
    /// Bottom-up estimate from unit layout along a corridor
    Layout(LayoutParameters),
}

impl PartitionMode {
    /// Single-letter code used by the prompt and template tokens
    pub fn code(&self) -> &'static str {
        match self {
            PartitionMode::Factor { .. } => "F",
            PartitionMode::Layout(_) => "L",
        }
    }

    /// Layout fields, if this is layout mode
    pub fn layout(&self) -> Option<&LayoutParameters> {
        match self {
            PartitionMode::Factor { .. } => None,
            PartitionMode::Layout(layout) => Some(layout),
        }
    }
}

/// Inputs for the bottom-up layout strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutParameters {
    pub building_use: BuildingUse,
    pub corridor_position: CorridorPosition,
    /// Corridor clear width (m)
    pub corridor_width: f64,
    /// Wall length around one bathroom module (m), e.g. 10 for 2.5 × 2.5
    pub bathroom_perimeter: f64,
}

/// Occupancy type driving unit size and bathroom count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingUse {
    Residential,
    Commercial,
    Office,
}

impl BuildingUse {
    /// All building uses in prompt order
    pub const ALL: [BuildingUse; 3] = [
        BuildingUse::Residential,
        BuildingUse::Commercial,
        BuildingUse::Office,
    ];

    /// Average unit size (m²)
    pub fn unit_size_m2(&self) -> f64 {
        match self {
            BuildingUse::Residential => 71.5,
            BuildingUse::Commercial => 50.0,
            BuildingUse::Office => 80.0,
        }
    }

    /// Bathroom modules per unit
    pub fn bathrooms_per_unit(&self) -> u32 {
        match self {
            BuildingUse::Residential => 1,
            BuildingUse::Commercial | BuildingUse::Office => 2,
        }
    }

    /// Single-letter code (R, C, O)
    pub fn code(&self) -> &'static str {
        match self {
            BuildingUse::Residential => "R",
            BuildingUse::Commercial => "C",
            BuildingUse::Office => "O",
        }
    }

    /// Parse from a letter code or full name, case-insensitive
    pub fn from_str_flexible(s: &str) -> TakeoffResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "R" | "RESIDENTIAL" => Ok(BuildingUse::Residential),
            "C" | "COMMERCIAL" => Ok(BuildingUse::Commercial),
            "O" | "OFFICE" => Ok(BuildingUse::Office),
            _ => Err(TakeoffError::invalid_choice(
                "partition.building-use",
                s,
                "R (Residential), C (Commercial), O (Office)",
            )),
        }
    }
}

impl std::fmt::Display for BuildingUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BuildingUse::Residential => "Residential",
            BuildingUse::Commercial => "Commercial",
            BuildingUse::Office => "Office",
        };
        write!(f, "{}", name)
    }
}

/// Where the corridor runs within the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorridorPosition {
    /// Double-loaded: units on both sides
    Middle,
    /// Single-loaded along the North façade
    North,
    /// Single-loaded along the South façade
    South,
}

impl CorridorPosition {
    /// Number of corridor walls running the full `length`
    pub fn corridor_wall_count(&self) -> u32 {
        match self {
            CorridorPosition::Middle => 2,
            CorridorPosition::North | CorridorPosition::South => 1,
        }
    }

    /// Single-letter code (M, N, S)
    pub fn code(&self) -> &'static str {
        match self {
            CorridorPosition::Middle => "M",
            CorridorPosition::North => "N",
            CorridorPosition::South => "S",
        }
    }

    /// Parse from a letter code or full name, case-insensitive
    pub fn from_str_flexible(s: &str) -> TakeoffResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "M" | "MIDDLE" => Ok(CorridorPosition::Middle),
            "N" | "NORTH" => Ok(CorridorPosition::North),
            "S" | "SOUTH" => Ok(CorridorPosition::South),
            _ => Err(TakeoffError::invalid_choice(
                "partition.corridor-position",
                s,
                "M (Middle), N (North), S (South)",
            )),
        }
    }
}

/// Window-to-wall ratio strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WwrMode {
    /// One ratio for the whole envelope
    Simple { wwr_general: f64 },
    /// One ratio per façade orientation
    ByOrientation(OrientationRatios),
}

impl WwrMode {
    /// Single-letter code used by the prompt and template tokens
    pub fn code(&self) -> &'static str {
        match self {
            WwrMode::Simple { .. } => "S",
            WwrMode::ByOrientation(_) => "O",
        }
    }

    /// Ratio applied to a given façade. Simple mode applies its general
    /// ratio to every orientation.
    pub fn ratio(&self, orientation: Orientation) -> f64 {
        match self {
            WwrMode::Simple { wwr_general } => *wwr_general,
            WwrMode::ByOrientation(ratios) => ratios.get(orientation),
        }
    }
}

/// Per-façade window-to-wall ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationRatios {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl OrientationRatios {
    /// Same ratio on all four façades
    pub fn uniform(ratio: f64) -> Self {
        OrientationRatios {
            north: ratio,
            south: ratio,
            east: ratio,
            west: ratio,
        }
    }

    /// Ratio for one façade
    pub fn get(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::North => self.north,
            Orientation::South => self.south,
            Orientation::East => self.east,
            Orientation::West => self.west,
        }
    }
}

/// Façade orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    South,
    East,
    West,
}

impl Orientation {
    /// All orientations in N, S, E, W order
    pub const ALL: [Orientation; 4] = [
        Orientation::North,
        Orientation::South,
        Orientation::East,
        Orientation::West,
    ];

    /// Single-letter code (N, S, E, W)
    pub fn code(&self) -> &'static str {
        match self {
            Orientation::North => "N",
            Orientation::South => "S",
            Orientation::East => "E",
            Orientation::West => "W",
        }
    }

    /// Length of this façade in plan: North/South run along `length`,
    /// East/West along `width`.
    pub fn facade_length(&self, params: &BuildingParameters) -> f64 {
        match self {
            Orientation::North | Orientation::South => params.length,
            Orientation::East | Orientation::West => params.width,
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_derived_dimensions() {
        let params = scenario_a();
        assert_eq!(params.total_height(), 15.0);
        assert_eq!(params.first_floor_area(), 200.0);
        assert_eq!(params.perimeter(), 60.0);
    }

    #[test]
    fn test_use_constants() {
        assert_eq!(BuildingUse::Residential.unit_size_m2(), 71.5);
        assert_eq!(BuildingUse::Residential.bathrooms_per_unit(), 1);
        assert_eq!(BuildingUse::Commercial.unit_size_m2(), 50.0);
        assert_eq!(BuildingUse::Commercial.bathrooms_per_unit(), 2);
        assert_eq!(BuildingUse::Office.unit_size_m2(), 80.0);
        assert_eq!(BuildingUse::Office.bathrooms_per_unit(), 2);
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(BuildingUse::from_str_flexible("r").unwrap(), BuildingUse::Residential);
        assert_eq!(BuildingUse::from_str_flexible(" Office ").unwrap(), BuildingUse::Office);
        assert!(BuildingUse::from_str_flexible("X").is_err());

        assert_eq!(CorridorPosition::from_str_flexible("m").unwrap(), CorridorPosition::Middle);
        assert_eq!(CorridorPosition::from_str_flexible("SOUTH").unwrap(), CorridorPosition::South);
        assert!(CorridorPosition::from_str_flexible("east").is_err());
    }

    #[test]
    fn test_corridor_wall_count() {
        assert_eq!(CorridorPosition::Middle.corridor_wall_count(), 2);
        assert_eq!(CorridorPosition::North.corridor_wall_count(), 1);
        assert_eq!(CorridorPosition::South.corridor_wall_count(), 1);
    }

    #[test]
    fn test_orientation_facade_lengths() {
        let params = scenario_a();
        assert_eq!(Orientation::North.facade_length(&params), 20.0);
        assert_eq!(Orientation::South.facade_length(&params), 20.0);
        assert_eq!(Orientation::East.facade_length(&params), 10.0);
        assert_eq!(Orientation::West.facade_length(&params), 10.0);
    }

    #[test]
    fn test_simple_ratio_applies_everywhere() {
        let mode = WwrMode::Simple { wwr_general: 0.25 };
        for orientation in Orientation::ALL {
            assert_eq!(mode.ratio(orientation), 0.25);
        }
    }

    #[test]
    fn test_tagged_serialization() {
        let params = scenario_d();
        let json = serde_json::to_string_pretty(&params).unwrap();
        assert!(json.contains("\"mode\": \"layout\""));
        assert!(json.contains("\"building_use\": \"Residential\""));

        let roundtrip: BuildingParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, params);
    }

    #[test]
    fn test_orientation_mode_serialization() {
        let mode = WwrMode::ByOrientation(OrientationRatios {
            north: 0.3,
            south: 0.5,
            east: 0.4,
            west: 0.4,
        });
        let json = serde_json::to_string(&mode).unwrap();
        assert!(json.contains("\"mode\":\"by_orientation\""));
        let roundtrip: WwrMode = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, mode);
    }
}
