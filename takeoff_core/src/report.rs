//! # Quantity Report
//!
//! The engine's output record and its tabular form.
//!
//! A [`QuantityReport`] is plain read-only data. [`QuantityReport::rows`] turns
//! it into labelled rows with units, which is the wire format shared by the
//! CSV export and the console summary:
//!
//! ```text
//! Quantity,Value,Unit
//! --- AREAS ---,,
//! First Floor Area,200.00,m²
//! ...
//! --- LINEAR METERS & UNITS ---,,
//! Total Columns,15,units
//! ...
//! ```
//!
//! Areas and lengths are written with two decimals, counts as integers.
//! [`read_csv`] parses an export back into the same rows.

use std::fmt;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::errors::{TakeoffError, TakeoffResult};
use crate::units::QuantityUnit;

/// CSV header row
pub const CSV_HEADER: [&str; 3] = ["Quantity", "Value", "Unit"];

/// Section marker preceding the area rows
pub const AREAS_SECTION: &str = "--- AREAS ---";

/// Section marker preceding the length and count rows
pub const LINEAR_SECTION: &str = "--- LINEAR METERS & UNITS ---";

/// Derived quantities for one building.
///
/// ## JSON Example
///
/// ```json
/// {
///   "first_floor_area": 200.0,
///   "roof_area": 200.0,
///   "upper_levels_area": 800.0,
///   "gross_floor_area": 1000.0,
///   "exterior_wall_area_gross": 900.0,
///   "window_area": 360.0,
///   "exterior_wall_area_net": 540.0,
///   "vertical_circulation_area": 0.0,
///   "interior_wall_area": 900.0,
///   "interior_wall_linear_meters": 300.0,
///   "total_units": 0,
///   "column_count": 15,
///   "column_linear_meters": 225.0,
///   "beam_linear_meters": 550.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityReport {
    // === Floor areas (m²) ===
    pub first_floor_area: f64,
    /// Flat roof, equal to the floor plate
    pub roof_area: f64,
    /// Floor plates above the ground floor; 0 for a single story
    pub upper_levels_area: f64,
    pub gross_floor_area: f64,

    // === Envelope (m²) ===
    pub exterior_wall_area_gross: f64,
    pub window_area: f64,
    /// Gross minus windows, not clamped at zero
    pub exterior_wall_area_net: f64,

    // === Interior (m², m) ===
    pub vertical_circulation_area: f64,
    pub interior_wall_area: f64,
    pub interior_wall_linear_meters: f64,

    // === Counts and structure ===
    /// Always 0 when partitions are estimated by density factor
    pub total_units: u64,
    pub column_count: u64,
    pub column_linear_meters: f64,
    pub beam_linear_meters: f64,
}

/// One line of the tabular report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRow {
    /// Section marker with empty value and unit cells
    Section { title: String },
    /// A labelled quantity
    Quantity {
        label: String,
        value: f64,
        unit: QuantityUnit,
    },
}

impl ReportRow {
    fn section(title: &str) -> Self {
        ReportRow::Section {
            title: title.to_string(),
        }
    }

    fn quantity(label: &str, value: f64, unit: QuantityUnit) -> Self {
        ReportRow::Quantity {
            label: label.to_string(),
            value,
            unit,
        }
    }

    /// Label or section title
    pub fn label(&self) -> &str {
        match self {
            ReportRow::Section { title } => title,
            ReportRow::Quantity { label, .. } => label,
        }
    }

    /// The three CSV cells for this row
    pub fn cells(&self) -> [String; 3] {
        match self {
            ReportRow::Section { title } => [title.clone(), String::new(), String::new()],
            ReportRow::Quantity { label, value, unit } => {
                [label.clone(), format_value(*value, *unit), unit.symbol().to_string()]
            }
        }
    }
}

/// Format a value the way the export writes it.
pub fn format_value(value: f64, unit: QuantityUnit) -> String {
    if unit.is_count() {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}

impl QuantityReport {
    /// Rows in export order, with section markers.
    pub fn rows(&self) -> Vec<ReportRow> {
        use QuantityUnit::{Meters, SquareMeters, Units};

        vec![
            ReportRow::section(AREAS_SECTION),
            ReportRow::quantity("First Floor Area", self.first_floor_area, SquareMeters),
            ReportRow::quantity("Roof Area (Assumed)", self.roof_area, SquareMeters),
            ReportRow::quantity("Upper Levels Area", self.upper_levels_area, SquareMeters),
            ReportRow::quantity("GROSS FLOOR AREA", self.gross_floor_area, SquareMeters),
            ReportRow::quantity("Gross Exterior Wall Area", self.exterior_wall_area_gross, SquareMeters),
            ReportRow::quantity("Total Window Area", self.window_area, SquareMeters),
            ReportRow::quantity("NET EXTERIOR WALL AREA", self.exterior_wall_area_net, SquareMeters),
            ReportRow::quantity("Vertical Circulation Area", self.vertical_circulation_area, SquareMeters),
            ReportRow::quantity("Interior Wall Area (Est.)", self.interior_wall_area, SquareMeters),
            ReportRow::section(LINEAR_SECTION),
            ReportRow::quantity("Total Columns", self.column_count as f64, Units),
            ReportRow::quantity("Total Column Length", self.column_linear_meters, Meters),
            ReportRow::quantity("Total Beam Length", self.beam_linear_meters, Meters),
            ReportRow::quantity("Interior Wall Length (Est.)", self.interior_wall_linear_meters, Meters),
            ReportRow::quantity("Estimated Total Units", self.total_units as f64, Units),
        ]
    }

    /// Write the report as `Quantity,Value,Unit` CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> TakeoffResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER).map_err(csv_error)?;
        for row in self.rows() {
            csv_writer.write_record(row.cells()).map_err(csv_error)?;
        }
        csv_writer
            .flush()
            .map_err(|e| TakeoffError::serialization(format!("CSV flush failed: {}", e)))
    }

    /// Render the report to a CSV string.
    pub fn to_csv_string(&self) -> TakeoffResult<String> {
        let mut buffer = Vec::new();
        self.write_csv(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TakeoffError::serialization(e.to_string()))
    }
}

/// Parse a CSV export back into rows.
///
/// Rows whose value and unit cells are both empty are section markers.
pub fn read_csv<R: Read>(reader: R) -> TakeoffResult<Vec<ReportRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(TakeoffError::serialization(format!(
            "unexpected CSV header: {:?}",
            headers.iter().collect::<Vec<_>>()
        )));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let label = record.get(0).unwrap_or_default();
        let value = record.get(1).unwrap_or_default().trim();
        let unit = record.get(2).unwrap_or_default().trim();

        if value.is_empty() && unit.is_empty() {
            rows.push(ReportRow::section(label));
            continue;
        }

        let unit = QuantityUnit::from_symbol(unit).ok_or_else(|| {
            TakeoffError::serialization(format!("unknown unit '{}' for '{}'", unit, label))
        })?;
        let value: f64 = value.parse().map_err(|_| {
            TakeoffError::serialization(format!("invalid value '{}' for '{}'", value, label))
        })?;
        rows.push(ReportRow::quantity(label, value, unit));
    }
    Ok(rows)
}

fn csv_error(e: csv::Error) -> TakeoffError {
    TakeoffError::serialization(format!("CSV error: {}", e))
}

/// Two decimals with thousands separators, e.g. `12,345.60`.
fn grouped(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value < 0.0 && formatted != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}

impl fmt::Display for QuantityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- CALCULATION REPORT ---")?;
        writeln!(f, "==========================")?;
        for row in self.rows() {
            match row {
                ReportRow::Section { title } => {
                    writeln!(f)?;
                    writeln!(f, "{}", title)?;
                }
                ReportRow::Quantity { label, value, unit } => {
                    let shown = if unit.is_count() {
                        format_value(value, unit)
                    } else {
                        grouped(value)
                    };
                    writeln!(f, "{:<30} {:>14} {}", format!("{}:", label), shown, unit)?;
                }
            }
        }
        write!(f, "==========================")
    }
}
