//! # takeoff_core - Parametric Building Quantity Engine
//!
//! `takeoff_core` turns a handful of building parameters (footprint, story
//! count and height, column spacing, façade glazing ratios and an interior
//! partition strategy) into a quantity takeoff for early-stage life cycle
//! assessment. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Validate Once**: Raw input is checked at the boundary; the engine never fails
//!
//! ## Quick Start
//!
//! ```rust
//! use takeoff_core::engine;
//! use takeoff_core::parameters::*;
//!
//! let params = BuildingParameters {
//!     length: 40.0,
//!     width: 20.0,
//!     height_per_story: 3.0,
//!     num_stories: 3,
//!     num_vertical_modules: 2,
//!     col_spacing_length: 8.0,
//!     col_spacing_width: 5.0,
//!     partition_mode: PartitionMode::Layout(LayoutParameters {
//!         building_use: BuildingUse::Residential,
//!         corridor_position: CorridorPosition::Middle,
//!         corridor_width: 2.0,
//!         bathroom_perimeter: 10.0,
//!     }),
//!     wwr_mode: WwrMode::Simple { wwr_general: 0.4 },
//! };
//!
//! let report = engine::derive(&params);
//! assert_eq!(report.total_units, 30);
//!
//! let csv = report.to_csv_string().unwrap();
//! assert!(csv.starts_with("Quantity,Value,Unit"));
//! ```
//!
//! ## Modules
//!
//! - [`parameters`] - Validated building parameters and mode enums
//! - [`validation`] - Raw input records and their validation
//! - [`calculations`] - The four quantity estimators
//! - [`engine`] - Report derivation, single and batch
//! - [`report`] - Quantity report, rows, CSV and console output
//! - [`tokens`] - Template tokens for modeling-tool scripts
//! - [`units`] - Quantity units
//! - [`errors`] - Structured error types
//! - [`file_io`] - Atomic exports and parameter file loading

pub mod calculations;
pub mod engine;
pub mod errors;
pub mod file_io;
pub mod parameters;
pub mod report;
pub mod tokens;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use engine::{derive, derive_batch, derive_detailed, Derivation};
pub use errors::{TakeoffError, TakeoffResult};
pub use file_io::{export_csv, export_json, load_parameters, ExportDocument};
pub use parameters::{BuildingParameters, PartitionMode, WwrMode};
pub use report::{QuantityReport, ReportRow};
pub use tokens::TemplateTokens;
pub use validation::ParameterInput;
