//! # Quantity Units
//!
//! All quantities are metric: plan dimensions and lengths in meters, areas in
//! square meters, and counts as whole units. Report fields stay plain `f64`
//! and `u64` so JSON stays clean; the unit travels alongside the value in
//! [`ReportRow`](crate::report::ReportRow).
//!
//! ## Example
//!
//! ```rust
//! use takeoff_core::units::QuantityUnit;
//!
//! assert_eq!(QuantityUnit::SquareMeters.symbol(), "m²");
//! assert_eq!(QuantityUnit::from_symbol("m"), Some(QuantityUnit::Meters));
//! ```

use serde::{Deserialize, Serialize};

/// Unit attached to an exported quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityUnit {
    /// m²
    #[serde(rename = "m²")]
    SquareMeters,
    /// m
    #[serde(rename = "m")]
    Meters,
    /// Whole counts (columns, dwelling/office units)
    #[serde(rename = "units")]
    Units,
}

impl QuantityUnit {
    /// All units in export order
    pub const ALL: [QuantityUnit; 3] = [
        QuantityUnit::SquareMeters,
        QuantityUnit::Meters,
        QuantityUnit::Units,
    ];

    /// Symbol as written in the export's unit column
    pub fn symbol(&self) -> &'static str {
        match self {
            QuantityUnit::SquareMeters => "m²",
            QuantityUnit::Meters => "m",
            QuantityUnit::Units => "units",
        }
    }

    /// Parse the export's unit column back into a unit
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        QuantityUnit::ALL
            .into_iter()
            .find(|unit| unit.symbol() == symbol.trim())
    }

    /// Whether values in this unit are whole counts
    pub fn is_count(&self) -> bool {
        matches!(self, QuantityUnit::Units)
    }
}

impl std::fmt::Display for QuantityUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_roundtrip() {
        for unit in QuantityUnit::ALL {
            assert_eq!(QuantityUnit::from_symbol(unit.symbol()), Some(unit));
        }
        assert_eq!(QuantityUnit::from_symbol("ft"), None);
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&QuantityUnit::SquareMeters).unwrap();
        assert_eq!(json, "\"m²\"");
        let roundtrip: QuantityUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, QuantityUnit::SquareMeters);
    }

    #[test]
    fn test_count_units() {
        assert!(QuantityUnit::Units.is_count());
        assert!(!QuantityUnit::Meters.is_count());
    }
}
