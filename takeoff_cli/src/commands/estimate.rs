use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::EstimateArgs;
use crate::error::{CliError, Result};
use takeoff_core::engine;
use takeoff_core::file_io::{self, ExportDocument};
use tracing::{debug, info};

use super::{load_validated, model_name_from};

pub fn run(args: EstimateArgs, out: &mut impl Write) -> Result<()> {
    if args.name.is_some() && args.params.len() > 1 {
        return Err(CliError::Argument(
            "--name can only be used with a single parameter file".to_string(),
        ));
    }

    let names: Vec<String> = match &args.name {
        Some(name) => vec![name.clone()],
        None => args.params.iter().map(|p| model_name_from(p)).collect(),
    };
    let batch = args
        .params
        .iter()
        .map(|path| load_validated(path))
        .collect::<Result<Vec<_>>>()?;
    info!(count = batch.len(), "Parameters loaded and validated.");

    let reports = engine::derive_batch(&batch);
    let several = batch.len() > 1;

    for ((name, params), report) in names.iter().zip(batch).zip(reports) {
        writeln!(out, "\n=== {} ===", name)?;
        writeln!(out, "{}", report)?;

        if let Some(target) = &args.csv {
            let path = output_path(target, several, &file_io::csv_file_name(name))?;
            file_io::export_csv(&report, &path)?;
            writeln!(out, "Successfully exported results to {}", path.display())?;
        }

        if let Some(target) = &args.json {
            let path = output_path(target, several, &format!("{}.json", name))?;
            let document = ExportDocument::new(name.as_str(), params, report);
            file_io::export_json(&document, &path)?;
            writeln!(out, "Successfully exported results to {}", path.display())?;
        }
    }

    Ok(())
}

/// The target itself for one building; a file inside the target directory for several.
fn output_path(target: &Path, several: bool, file_name: &str) -> Result<PathBuf> {
    if !several {
        return Ok(target.to_path_buf());
    }
    fs::create_dir_all(target)?;
    debug!(dir = %target.display(), file_name, "Batch output path.");
    Ok(target.join(file_name))
}
