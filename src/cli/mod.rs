//! CLI support for qsdsl
//!
//! Provides programmatic access to the `qsdsl` commands so other tools can
//! embed them without shelling out.

mod check;
mod registry;

pub use check::{CheckOptions, execute_canonical, execute_check, execute_serialize};
pub use registry::{load_operators, operators_from_json};

use std::io;

use crate::convert::ConvertError;

/// Which start rule a command applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Kind {
    Filter,
    Sort,
}

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parse, resolve or serialize error
    Parse(crate::Error),
    /// JSON AST with the wrong shape
    Convert(ConvertError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Malformed operators file
    InvalidRegistry(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Error: {}", e),
            CliError::Convert(e) => write!(f, "Invalid AST: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => write!(f, "No input provided. Use --input or pipe JSON to stdin."),
            CliError::InvalidRegistry(msg) => write!(f, "Invalid operators file: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Convert(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::Error> for CliError {
    fn from(e: crate::Error) -> Self {
        CliError::Parse(e)
    }
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        CliError::Convert(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
