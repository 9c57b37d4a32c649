use std::path::PathBuf;
use takeoff_core::errors::TakeoffError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TakeoffError),

    #[error("Failed to process '{path}': {source}", path = path.display())]
    ParameterFile {
        path: PathBuf,
        #[source]
        source: TakeoffError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

impl CliError {
    /// The core error underneath, if any
    pub fn core(&self) -> Option<&TakeoffError> {
        match self {
            CliError::Core(e) | CliError::ParameterFile { source: e, .. } => Some(e),
            _ => None,
        }
    }
}
