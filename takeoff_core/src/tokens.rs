//! # Template Tokens
//!
//! A flat map of named values derived once from the parameters and the
//! engine's derivation, for substitution into modeling-tool script templates.
//! The engine knows nothing about templates; this module only reads its output.
//!
//! Placeholders are written `{TOKEN}`. Literal braces are escaped by doubling
//! them (`{{` and `}}`), so a template can carry the target language's own
//! dictionaries and format strings.
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::engine;
//! use takeoff_core::tokens::TemplateTokens;
//! # use takeoff_core::parameters::*;
//! # let params = BuildingParameters {
//! #     length: 20.0, width: 10.0, height_per_story: 3.0, num_stories: 5,
//! #     num_vertical_modules: 0, col_spacing_length: 5.0, col_spacing_width: 5.0,
//! #     partition_mode: PartitionMode::Factor { partition_density_factor: 0.3 },
//! #     wwr_mode: WwrMode::Simple { wwr_general: 0.4 },
//! # };
//!
//! let derivation = engine::derive_detailed(&params);
//! let tokens = TemplateTokens::from_derivation("Block-A", &params, &derivation);
//!
//! let script = tokens.render("L = {L}\nNUM_COLS_X = {NUM_COLS_X}\nd = {{}}").unwrap();
//! assert_eq!(script, "L = 20\nNUM_COLS_X = 5\nd = {}");
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::engine::Derivation;
use crate::errors::{TakeoffError, TakeoffResult};
use crate::parameters::{BuildingParameters, Orientation, PartitionMode};

/// Floor slab thickness for modeled geometry (m)
pub const SLAB_THICKNESS_M: f64 = 0.3;
/// Exterior wall thickness for modeled geometry (m)
pub const WALL_THICKNESS_M: f64 = 0.3;
/// Column radius for modeled geometry (m)
pub const COL_RADIUS_M: f64 = 0.25;
/// Beam depth for modeled geometry (m)
pub const BEAM_HEIGHT_M: f64 = 0.4;
/// Beam width for modeled geometry (m)
pub const BEAM_WIDTH_M: f64 = 0.3;
/// Plan size of one square vertical core (m)
pub const CORE_DIM_M: f64 = 5.0;
/// Interior partition thickness (m)
pub const PARTITION_THICKNESS_M: f64 = 0.15;
/// Plan size of one square bathroom module (m)
pub const BATH_MODULE_DIM_M: f64 = 2.0;
/// Largest window width as a share of its bay
pub const MAX_WINDOW_BAY_SHARE: f64 = 0.9;
/// Longest column coordinate list written to `COLUMN_XS` / `COLUMN_YS`
pub const MAX_LISTED_COLUMN_LINES: u64 = 10_000;

/// Named token values, sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateTokens {
    tokens: BTreeMap<String, String>,
}

impl TemplateTokens {
    /// Build the token map for one building.
    ///
    /// Grid counts come from the structural grid estimate, so zero spacing is
    /// handled the same way here as in the report. Column lines are spread
    /// evenly over each plan dimension, centred on the origin.
    pub fn from_derivation(model_name: &str, params: &BuildingParameters, derivation: &Derivation) -> Self {
        let mut tokens = TemplateTokens::default();
        let grid = &derivation.grid;

        tokens.insert("MODEL_NAME", model_name);
        tokens.insert_num("L", params.length);
        tokens.insert_num("W", params.width);
        tokens.insert_num("H_STORY", params.height_per_story);
        tokens.insert("N_STORIES", params.num_stories);
        tokens.insert_num("TOTAL_H", params.total_height());
        tokens.insert("N_CORES", params.num_vertical_modules);

        // Grid
        let x_spacing = bay_width(params.length, grid.columns_along_length);
        let y_spacing = bay_width(params.width, grid.columns_along_width);
        let x_start = -params.length / 2.0;
        let y_start = -params.width / 2.0;
        tokens.insert("NUM_COLS_X", grid.columns_along_length);
        tokens.insert("NUM_COLS_Y", grid.columns_along_width);
        tokens.insert_num("X_SPACING", x_spacing);
        tokens.insert_num("Y_SPACING", y_spacing);
        tokens.insert_num("X_START", x_start);
        tokens.insert_num("Y_START", y_start);
        tokens.insert("COLUMN_XS", coordinates(x_start, x_spacing, grid.columns_along_length));
        tokens.insert("COLUMN_YS", coordinates(y_start, y_spacing, grid.columns_along_width));

        // Façade: North/South bays run along X (length), East/West along Y (width)
        for orientation in Orientation::ALL {
            let wwr = params.wwr_mode.ratio(orientation);
            let bay = match orientation {
                Orientation::North | Orientation::South => x_spacing,
                Orientation::East | Orientation::West => y_spacing,
            };
            tokens.insert_num(&format!("WWR_{}", orientation.code()), wwr);
            tokens.insert_num(&format!("WINDOW_WIDTH_{}", orientation.code()), window_width(bay, wwr));
        }
        tokens.insert("WWR_MODE", params.wwr_mode.code());

        // Interior
        tokens.insert("PARTITION_MODE", params.partition_mode.code());
        match &params.partition_mode {
            PartitionMode::Layout(layout) => {
                tokens.insert("BUILDING_USE", layout.building_use.code());
                tokens.insert("CORRIDOR_POS", layout.corridor_position.code());
                tokens.insert_num("CORRIDOR_WIDTH", layout.corridor_width);
                tokens.insert_num("PDF", 0.0);
            }
            PartitionMode::Factor {
                partition_density_factor,
            } => {
                tokens.insert("BUILDING_USE", "");
                tokens.insert("CORRIDOR_POS", "");
                tokens.insert_num("CORRIDOR_WIDTH", 0.0);
                tokens.insert_num("PDF", *partition_density_factor);
            }
        }
        tokens.insert("UNITS_PER_STORY", derivation.partitions.units_per_story);

        // Headline quantities
        tokens.insert_num("GROSS_FLOOR_AREA", derivation.report.gross_floor_area);
        tokens.insert_num("WINDOW_AREA", derivation.report.window_area);
        tokens.insert("TOTAL_UNITS", derivation.report.total_units);

        // Modeling constants
        tokens.insert_num("SLAB_THICKNESS", SLAB_THICKNESS_M);
        tokens.insert_num("WALL_THICKNESS", WALL_THICKNESS_M);
        tokens.insert_num("COL_RADIUS", COL_RADIUS_M);
        tokens.insert_num("BEAM_HEIGHT", BEAM_HEIGHT_M);
        tokens.insert_num("BEAM_WIDTH", BEAM_WIDTH_M);
        tokens.insert_num("CORE_DIM", CORE_DIM_M);
        tokens.insert_num("PARTITION_THICKNESS", PARTITION_THICKNESS_M);
        tokens.insert_num("BATH_MODULE_DIM", BATH_MODULE_DIM_M);

        tokens
    }

    fn insert(&mut self, name: &str, value: impl ToString) {
        self.tokens.insert(name.to_string(), value.to_string());
    }

    fn insert_num(&mut self, name: &str, value: f64) {
        // Avoid "-0" in generated source
        let value = if value == 0.0 { 0.0 } else { value };
        self.insert(name, value);
    }

    /// Value of one token
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tokens.get(name).map(String::as_str)
    }

    /// Tokens in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True if there are no tokens
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Substitute every `{TOKEN}` placeholder in `template`.
    ///
    /// `{{` and `}}` produce literal braces. Unknown tokens, empty or
    /// unterminated placeholders, and stray `}` are errors.
    pub fn render(&self, template: &str) -> TakeoffResult<String> {
        let mut output = String::with_capacity(template.len());
        let mut chars = template.char_indices().peekable();

        while let Some((position, c)) = chars.next() {
            match c {
                '{' if chars.peek().map(|&(_, next)| next) == Some('{') => {
                    chars.next();
                    output.push('{');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, next) in chars.by_ref() {
                        if next == '}' {
                            closed = true;
                            break;
                        }
                        name.push(next);
                    }
                    if !closed {
                        return Err(TakeoffError::template(
                            name,
                            format!("unterminated placeholder starting at byte {}", position),
                        ));
                    }
                    let value = self.get(name.trim()).ok_or_else(|| {
                        TakeoffError::template(name.as_str(), "unknown token")
                    })?;
                    output.push_str(value);
                }
                '}' if chars.peek().map(|&(_, next)| next) == Some('}') => {
                    chars.next();
                    output.push('}');
                }
                '}' => {
                    return Err(TakeoffError::template(
                        "}",
                        format!("unmatched '}}' at byte {}", position),
                    ));
                }
                _ => output.push(c),
            }
        }

        Ok(output)
    }
}

/// Distance between evenly spread column lines; 0 with fewer than two lines.
fn bay_width(dimension: f64, column_lines: u64) -> f64 {
    if column_lines > 1 {
        dimension / (column_lines - 1) as f64
    } else {
        0.0
    }
}

/// Window width in one bay: `bay × √wwr`, capped at [`MAX_WINDOW_BAY_SHARE`] of the bay.
fn window_width(bay: f64, wwr: f64) -> f64 {
    if bay > 0.0 && wwr > 0.0 {
        (bay * wwr.sqrt()).min(bay * MAX_WINDOW_BAY_SHARE)
    } else {
        0.0
    }
}

/// Comma-separated column line coordinates; empty above [`MAX_LISTED_COLUMN_LINES`].
fn coordinates(start: f64, spacing: f64, count: u64) -> String {
    if count > MAX_LISTED_COLUMN_LINES {
        warn!(count, "too many column lines to list; coordinate token left empty");
        return String::new();
    }
    (0..count)
        .map(|i| {
            let coordinate = start + i as f64 * spacing;
            let coordinate = if coordinate == 0.0 { 0.0 } else { coordinate };
            coordinate.to_string()
        })
        .collect::<Vec<_>>()
        .join(",")
}
