use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Takeoff - early-stage construction quantity estimates (areas, linear meters, counts) from a few building parameters.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch derivation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Derive quantity reports from one or more parameter files (TOML or JSON).
    Estimate(EstimateArgs),
    /// Enter parameters at the terminal, print the report and export it as CSV.
    Interactive(InteractiveArgs),
    /// Print template tokens for a building, or fill them into a script template.
    Tokens(TokensArgs),
}

/// Arguments for the `estimate` subcommand.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Parameter files. Several files are derived in parallel.
    #[arg(short, long = "params", required = true, num_args = 1.., value_name = "PATH")]
    pub params: Vec<PathBuf>,

    /// Model name (single parameter file only). Defaults to the file stem.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// CSV output. A file for one parameter file, a directory for several.
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// JSON output. A file for one parameter file, a directory for several.
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// Arguments for the `interactive` subcommand.
#[derive(Args, Debug)]
pub struct InteractiveArgs {
    /// Model name for the export. Prompted for when omitted.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory for the CSV export
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub out_dir: PathBuf,
}

/// Arguments for the `tokens` subcommand.
#[derive(Args, Debug)]
pub struct TokensArgs {
    /// Parameter file (TOML or JSON)
    #[arg(short, long = "params", required = true, value_name = "PATH")]
    pub params: PathBuf,

    /// Model name. Defaults to the file stem.
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Script template with `{TOKEN}` placeholders
    #[arg(short, long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Where to write the rendered template. Printed to stdout when omitted.
    #[arg(short, long, requires = "template", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print the token map as JSON instead of `NAME = value` lines
    #[arg(long, conflicts_with = "template")]
    pub json: bool,
}
