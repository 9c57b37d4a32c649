//! # Quantity Estimators
//!
//! Each estimator is a pure function of the [`BuildingParameters`](crate::parameters::BuildingParameters):
//!
//! - `*Result` - Estimate results (JSON-serializable)
//! - `calculate(params) -> *Result` - Infallible, deterministic estimate
//!
//! No estimator reads another's output, so they can run in any order. The
//! [`engine`](crate::engine) assembles them into one report.
//!
//! ## Available Estimators
//!
//! - [`structural_grid`] - Column counts, column and beam linear meters
//! - [`facade`] - Gross/net exterior wall and window area
//! - [`circulation`] - Stair/elevator core floor area
//! - [`partitions`] - Interior wall length, area and unit counts

pub mod circulation;
pub mod facade;
pub mod partitions;
pub mod structural_grid;

// Re-export commonly used types
pub use circulation::CirculationResult;
pub use facade::{FacadeResult, FacadeSide};
pub use partitions::{LayoutBreakdown, PartitionResult};
pub use structural_grid::GridResult;
