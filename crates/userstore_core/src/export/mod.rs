//! One-way export adapters.
//!
//! # Responsibility
//! - Serialize the current user collection to external tabular formats.
//!
//! # Invariants
//! - Exports read the collection only; there is no import path.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub mod csv;

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    /// The export target could not be created.
    Io { path: PathBuf, source: io::Error },
    /// Writing rows failed.
    Csv(::csv::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot create export file `{}`: {source}", path.display())
            }
            Self::Csv(err) => write!(f, "csv export failed: {err}"),
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<::csv::Error> for ExportError {
    fn from(value: ::csv::Error) -> Self {
        Self::Csv(value)
    }
}
