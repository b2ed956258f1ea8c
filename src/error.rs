//! Crate-wide error type.
//!
//! All input validation happens once, at run entry: a bad catalog or a GA
//! parameter outside its domain fails fast with a descriptive message and no
//! partial state. Once the evolutionary loop starts, every per-generation
//! operation is total over its inputs.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The action/distress catalog is structurally invalid.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    /// A GA parameter is outside its documented domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
