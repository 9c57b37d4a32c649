use std::io::{self, BufRead, Write};

use crate::cli::InteractiveArgs;
use crate::error::Result;
use crate::prompt::Prompter;
use takeoff_core::engine;
use takeoff_core::file_io;
use tracing::info;

const DEFAULT_MODEL_NAME: &str = "construction_results";

pub fn run(args: InteractiveArgs) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_with(args, stdin.lock(), stdout.lock())
}

pub fn run_with(args: InteractiveArgs, input: impl BufRead, mut output: impl Write) -> Result<()> {
    let mut prompter = Prompter::new(input, &mut output);
    prompter.say("Welcome to the Construction Quantity Calculator!")?;
    prompter.say("This tool estimates areas (m²) and linear meters (m).")?;
    prompter.say("Please provide the following details in meters.\n")?;

    let raw = prompter.collect_parameters()?;
    let model_name = match args.name {
        Some(name) => name,
        None => {
            let entered =
                prompter.text("\nEnter a Model Name for CSV export (e.g., Building-A): ")?;
            if entered.is_empty() {
                DEFAULT_MODEL_NAME.to_string()
            } else {
                entered
            }
        }
    };
    drop(prompter);

    let params = raw.validate()?;
    info!(model = %model_name, "Parameters entered and validated.");

    let report = engine::derive(&params);
    writeln!(output, "\n\n{}", report)?;
    writeln!(output, "Calculation complete.")?;

    let path = args.out_dir.join(file_io::csv_file_name(&model_name));
    file_io::export_csv(&report, &path)?;
    writeln!(output, "\nSuccessfully exported results to {}", path.display())?;

    Ok(())
}
