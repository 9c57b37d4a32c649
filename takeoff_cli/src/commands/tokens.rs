use std::fs;
use std::io::Write;

use crate::cli::TokensArgs;
use crate::error::Result;
use takeoff_core::engine;
use takeoff_core::errors::TakeoffError;
use takeoff_core::file_io;
use takeoff_core::tokens::TemplateTokens;
use tracing::info;

use super::{load_validated, model_name_from};

pub fn run(args: TokensArgs, out: &mut impl Write) -> Result<()> {
    let params = load_validated(&args.params)?;
    let model_name = args
        .name
        .clone()
        .unwrap_or_else(|| model_name_from(&args.params));

    let derivation = engine::derive_detailed(&params);
    let tokens = TemplateTokens::from_derivation(&model_name, &params, &derivation);

    let Some(template_path) = &args.template else {
        if args.json {
            let json = serde_json::to_string_pretty(&tokens)
                .map_err(|e| TakeoffError::serialization(e.to_string()))?;
            writeln!(out, "{}", json)?;
        } else {
            for (name, value) in tokens.iter() {
                writeln!(out, "{} = {}", name, value)?;
            }
        }
        return Ok(());
    };

    let template = fs::read_to_string(template_path)?;
    let rendered = tokens.render(&template)?;
    info!(template = %template_path.display(), tokens = tokens.len(), "Template rendered.");

    match &args.output {
        Some(path) => {
            file_io::export_text(&rendered, path)?;
            writeln!(out, "Script written to {}", path.display())?;
        }
        None => write!(out, "{}", rendered)?,
    }
    Ok(())
}
