//! # File I/O Module
//!
//! Flat exports and parameter loading:
//! - **Atomic writes**: Write to .tmp, sync, rename to prevent partial files
//! - **Version validation**: JSON exports carry a schema version checked on load
//! - **Parameter files**: TOML or JSON, chosen by extension
//!
//! There is no project persistence; every export is a standalone snapshot.
//!
//! ## Example
//!
//! ```rust,no_run
//! use takeoff_core::file_io::{export_csv, load_parameters};
//! use takeoff_core::engine;
//! use std::path::Path;
//!
//! let params = load_parameters(Path::new("block_a.toml"))?.validate()?;
//! let report = engine::derive(&params);
//! export_csv(&report, Path::new("Block-A_quantities.csv"))?;
//! # Ok::<(), takeoff_core::errors::TakeoffError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{TakeoffError, TakeoffResult};
use crate::parameters::BuildingParameters;
use crate::report::QuantityReport;
use crate::validation::ParameterInput;

/// Current schema version for JSON exports
pub const SCHEMA_VERSION: &str = "0.1.0";

/// JSON export envelope: one building's parameters and quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    /// Schema version (for compatibility checks on load)
    pub version: String,
    /// Model name used for file naming and templates
    pub model_name: String,
    /// When the export was produced
    pub generated_at: DateTime<Utc>,
    /// Validated input parameters
    pub parameters: BuildingParameters,
    /// Derived quantities
    pub report: QuantityReport,
}

impl ExportDocument {
    /// Wrap a derived report, stamped with the current time.
    pub fn new(model_name: impl Into<String>, parameters: BuildingParameters, report: QuantityReport) -> Self {
        ExportDocument {
            version: SCHEMA_VERSION.to_string(),
            model_name: model_name.into(),
            generated_at: Utc::now(),
            parameters,
            report,
        }
    }
}

/// Default CSV export file name for a model: `<name>_quantities.csv`.
///
/// Path separators in the name are replaced so the result stays a single
/// file name.
pub fn csv_file_name(model_name: &str) -> String {
    let safe: String = model_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    let safe = if safe.is_empty() { "model".to_string() } else { safe };
    format!("{}_quantities.csv", safe)
}

/// Write bytes to `path` with atomic write semantics.
///
/// The write process:
/// 1. Write to a temporary file next to the target (`<name>.tmp`)
/// 2. Sync to disk (fsync)
/// 3. Rename over the target (atomic on most filesystems)
///
/// The temp file is removed if any step after its creation fails.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> TakeoffResult<()> {
    let tmp_path = tmp_path_for(path);

    let result = write_and_sync(&tmp_path, bytes).and_then(|()| {
        fs::rename(&tmp_path, path).map_err(|e| {
            TakeoffError::file_error("rename to final", path.display().to_string(), e.to_string())
        })
    });

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    } else {
        debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
    }
    result
}

fn write_and_sync(tmp_path: &Path, bytes: &[u8]) -> TakeoffResult<()> {
    let mut tmp_file = File::create(tmp_path).map_err(|e| {
        TakeoffError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        TakeoffError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        TakeoffError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })
}

/// Temp file path for an atomic write: the target name plus `.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("export"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Export a report as a three-column CSV table.
pub fn export_csv(report: &QuantityReport, path: &Path) -> TakeoffResult<()> {
    let csv = report.to_csv_string()?;
    write_atomic(path, csv.as_bytes())
}

/// Export parameters and report as a pretty-printed [`ExportDocument`].
pub fn export_json(document: &ExportDocument, path: &Path) -> TakeoffResult<()> {
    let json = serde_json::to_string_pretty(document).map_err(|e| TakeoffError::serialization(e.to_string()))?;
    write_atomic(path, json.as_bytes())
}

/// Write already rendered text, e.g. a filled-in modeling script.
pub fn export_text(text: &str, path: &Path) -> TakeoffResult<()> {
    write_atomic(path, text.as_bytes())
}

/// Load a JSON export.
///
/// # Returns
///
/// * `Ok(ExportDocument)` - Successfully loaded export
/// * `Err(TakeoffError::VersionMismatch)` - File version is incompatible
/// * `Err(TakeoffError::SerializationError)` - Invalid JSON
/// * `Err(TakeoffError::FileError)` - I/O error
pub fn load_export(path: &Path) -> TakeoffResult<ExportDocument> {
    let contents = read_to_string(path)?;

    let document: ExportDocument = serde_json::from_str(&contents).map_err(|e| {
        TakeoffError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
    })?;

    validate_version(&document.version)?;

    Ok(document)
}

/// Load a raw parameter record from a `.toml` or `.json` file.
///
/// The record is not validated; call [`ParameterInput::validate`] next.
pub fn load_parameters(path: &Path) -> TakeoffResult<ParameterInput> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();

    let contents = read_to_string(path)?;
    debug!(path = %path.display(), format = %extension, "loading parameters");

    match extension.as_str() {
        "toml" => toml::from_str(&contents).map_err(|e| {
            TakeoffError::serialization(format!("Invalid TOML in {}: {}", path.display(), e))
        }),
        "json" => serde_json::from_str(&contents).map_err(|e| {
            TakeoffError::serialization(format!("Invalid JSON in {}: {}", path.display(), e))
        }),
        _ => Err(TakeoffError::invalid_choice(
            "parameter file extension",
            extension.clone(),
            "toml, json",
        )),
    }
}

fn read_to_string(path: &Path) -> TakeoffResult<String> {
    let mut file = File::open(path)
        .map_err(|e| TakeoffError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| TakeoffError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> TakeoffResult<()> {
    let mismatch = || TakeoffError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor may have breaking changes
    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}
