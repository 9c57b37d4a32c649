pub mod estimate;
pub mod interactive;
pub mod tokens;

use std::path::Path;

use crate::error::{CliError, Result};
use takeoff_core::file_io;
use takeoff_core::parameters::BuildingParameters;

/// Load and validate one parameter file, naming the file in any error.
pub(crate) fn load_validated(path: &Path) -> Result<BuildingParameters> {
    file_io::load_parameters(path)
        .and_then(|input| input.validate())
        .map_err(|source| CliError::ParameterFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Model name from the file stem, e.g. `block_a.toml` -> `block_a`.
pub(crate) fn model_name_from(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "model".to_string())
}
