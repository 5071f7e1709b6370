//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use coilyard::config::ConfigFileError;
use coilyard::layout::LayoutError;
use coilyard::placement::PlacementError;
use coilyard::source::SourceError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Arguments that parse but don't make sense together
    Usage(String),
    /// Configuration error
    Config(ConfigFileError),
    /// Yard layout that cannot be addressed
    Layout(LayoutError),
    /// Operator input or placement rejected
    Placement(PlacementError),
    /// Could not set up the arrival feed
    Source(SourceError),
    /// Terminal prompt failed
    Prompt(String),
    /// Async runtime could not start
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(ConfigFileError::InvalidValue { .. }) => {
                eprintln!();
                eprintln!("Fix the value in {}", coilyard::config::config_file_path().display());
                eprintln!("or run 'coilyard config init --force' to start from defaults.");
            }
            CliError::Source(_) => {
                eprintln!();
                eprintln!("Check [api] base_url in the configuration or pass --api-url.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Layout(e) => write!(f, "Layout error: {}", e),
            CliError::Placement(e) => write!(f, "{}", e),
            CliError::Source(e) => write!(f, "Failed to set up arrival feed: {}", e),
            CliError::Prompt(msg) => write!(f, "Prompt error: {}", msg),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Layout(e) => Some(e),
            CliError::Placement(e) => Some(e),
            CliError::Source(e) => Some(e),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<LayoutError> for CliError {
    fn from(e: LayoutError) -> Self {
        CliError::Layout(e)
    }
}

impl From<PlacementError> for CliError {
    fn from(e: PlacementError) -> Self {
        CliError::Placement(e)
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Source(e)
    }
}
