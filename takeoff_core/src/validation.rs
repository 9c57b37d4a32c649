//! # Parameter Validation
//!
//! Raw, loosely typed input as it arrives from a parameter file or the
//! interactive prompt, and the single pure function that turns it into a
//! [`BuildingParameters`] or a structured error.
//!
//! Mode selectors accept the prompt's one-letter codes as well as full names,
//! case-insensitively:
//!
//! | field | values |
//! |-------|--------|
//! | `partition.mode` | `F` / `factor`, `L` / `layout` |
//! | `partition.building-use` | `R` / `residential`, `C` / `commercial`, `O` / `office` |
//! | `partition.corridor-position` | `M` / `middle`, `N` / `north`, `S` / `south` |
//! | `wwr.mode` | `S` / `simple`, `O` / `orientation` / `by-orientation` |
//!
//! ## TOML Example
//!
//! ```toml
//! length = 40.0
//! width = 20.0
//! height-per-story = 3.0
//! num-stories = 3
//! num-vertical-modules = 2
//! col-spacing-length = 8.0
//! col-spacing-width = 5.0
//!
//! [partition]
//! mode = "L"
//! building-use = "R"
//! corridor-position = "M"
//! corridor-width = 2.0
//! bathroom-perimeter = 10.0
//!
//! [wwr]
//! mode = "O"
//! north = 0.3
//! south = 0.5
//! east = 0.4
//! west = 0.4
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::parameters::{
    BuildingParameters, BuildingUse, CorridorPosition, LayoutParameters, OrientationRatios,
    PartitionMode, WwrMode,
};

/// Unvalidated building input.
///
/// Counts are read as numbers and must be whole; mode-dependent fields are
/// optional and checked against the selected mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ParameterInput {
    pub length: f64,
    pub width: f64,
    pub height_per_story: f64,
    pub num_stories: f64,
    #[serde(default)]
    pub num_vertical_modules: f64,
    pub col_spacing_length: f64,
    pub col_spacing_width: f64,
    pub partition: PartitionInput,
    pub wwr: WwrInput,
}

/// Unvalidated partition strategy selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PartitionInput {
    pub mode: String,
    pub density_factor: Option<f64>,
    pub building_use: Option<String>,
    pub corridor_position: Option<String>,
    pub corridor_width: Option<f64>,
    pub bathroom_perimeter: Option<f64>,
}

/// Unvalidated window-to-wall ratio selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WwrInput {
    pub mode: String,
    pub general: Option<f64>,
    pub north: Option<f64>,
    pub south: Option<f64>,
    pub east: Option<f64>,
    pub west: Option<f64>,
}

impl ParameterInput {
    /// Validate every field and build the typed parameter record.
    ///
    /// The first failing field is reported.
    pub fn validate(&self) -> TakeoffResult<BuildingParameters> {
        Ok(BuildingParameters {
            length: positive("length", self.length)?,
            width: positive("width", self.width)?,
            height_per_story: positive("height-per-story", self.height_per_story)?,
            num_stories: whole("num-stories", self.num_stories, 1)?,
            num_vertical_modules: whole("num-vertical-modules", self.num_vertical_modules, 0)?,
            col_spacing_length: non_negative("col-spacing-length", self.col_spacing_length)?,
            col_spacing_width: non_negative("col-spacing-width", self.col_spacing_width)?,
            partition_mode: self.partition.validate()?,
            wwr_mode: self.wwr.validate()?,
        })
    }
}

impl PartitionInput {
    fn validate(&self) -> TakeoffResult<PartitionMode> {
        match self.mode.trim().to_uppercase().as_str() {
            "F" | "FACTOR" => {
                let factor = required("partition.density-factor", self.density_factor)?;
                Ok(PartitionMode::Factor {
                    partition_density_factor: non_negative("partition.density-factor", factor)?,
                })
            }
            "L" | "LAYOUT" => {
                let building_use = self
                    .building_use
                    .as_deref()
                    .ok_or_else(|| TakeoffError::missing_field("partition.building-use"))?;
                let corridor_position = self
                    .corridor_position
                    .as_deref()
                    .ok_or_else(|| TakeoffError::missing_field("partition.corridor-position"))?;
                let corridor_width = required("partition.corridor-width", self.corridor_width)?;
                let bathroom_perimeter =
                    required("partition.bathroom-perimeter", self.bathroom_perimeter)?;

                Ok(PartitionMode::Layout(LayoutParameters {
                    building_use: BuildingUse::from_str_flexible(building_use)?,
                    corridor_position: CorridorPosition::from_str_flexible(corridor_position)?,
                    corridor_width: non_negative("partition.corridor-width", corridor_width)?,
                    bathroom_perimeter: non_negative(
                        "partition.bathroom-perimeter",
                        bathroom_perimeter,
                    )?,
                }))
            }
            _ => Err(TakeoffError::invalid_choice(
                "partition.mode",
                &self.mode,
                "F (factor), L (layout)",
            )),
        }
    }
}

impl WwrInput {
    fn validate(&self) -> TakeoffResult<WwrMode> {
        match self.mode.trim().to_uppercase().as_str() {
            "S" | "SIMPLE" => Ok(WwrMode::Simple {
                wwr_general: ratio("wwr.general", required("wwr.general", self.general)?)?,
            }),
            "O" | "ORIENTATION" | "BY-ORIENTATION" | "BY_ORIENTATION" => {
                Ok(WwrMode::ByOrientation(OrientationRatios {
                    north: ratio("wwr.north", required("wwr.north", self.north)?)?,
                    south: ratio("wwr.south", required("wwr.south", self.south)?)?,
                    east: ratio("wwr.east", required("wwr.east", self.east)?)?,
                    west: ratio("wwr.west", required("wwr.west", self.west)?)?,
                }))
            }
            _ => Err(TakeoffError::invalid_choice(
                "wwr.mode",
                &self.mode,
                "S (simple), O (orientation)",
            )),
        }
    }
}

fn required(field: &str, value: Option<f64>) -> TakeoffResult<f64> {
    value.ok_or_else(|| TakeoffError::missing_field(field))
}

fn non_negative(field: &str, value: f64) -> TakeoffResult<f64> {
    if !value.is_finite() {
        return Err(TakeoffError::invalid_input(field, value.to_string(), "Must be a finite number"));
    }
    if value < 0.0 {
        return Err(TakeoffError::invalid_input(field, value.to_string(), "Cannot be negative"));
    }
    Ok(value)
}

fn positive(field: &str, value: f64) -> TakeoffResult<f64> {
    let value = non_negative(field, value)?;
    if value == 0.0 {
        return Err(TakeoffError::invalid_input(field, value.to_string(), "Must be positive"));
    }
    Ok(value)
}

fn ratio(field: &str, value: f64) -> TakeoffResult<f64> {
    let value = non_negative(field, value)?;
    if value > 1.0 {
        return Err(TakeoffError::invalid_input(
            field,
            value.to_string(),
            "Window-to-wall ratio must be between 0 and 1",
        ));
    }
    Ok(value)
}

fn whole(field: &str, value: f64, min: u32) -> TakeoffResult<u32> {
    let value = non_negative(field, value)?;
    if value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(TakeoffError::invalid_input(field, value.to_string(), "Must be a whole number"));
    }
    let count = value as u32;
    if count < min {
        return Err(TakeoffError::invalid_input(
            field,
            value.to_string(),
            format!("Must be at least {}", min),
        ));
    }
    Ok(count)
}
