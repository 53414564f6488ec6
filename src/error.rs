use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while converting one chromosome's panel.
///
/// Every variant is local to a single chromosome; the driver reports them
/// per chromosome and leaves the decision to continue with the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("chromosome {chromosome}: input panel not found at {}", path.display())]
    MissingInput { path: PathBuf, chromosome: u8 },

    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedTable {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: call {field:?} is not a single character")]
    MalformedCall {
        line: usize,
        column: usize,
        field: String,
    },

    #[error("marker {marker}: more than two alleles observed ({symbols:?})")]
    UnsupportedVariant { marker: usize, symbols: Vec<char> },

    #[error("marker {marker}, call {offset}: symbol {symbol:?} is neither an allele nor a missing sentinel")]
    SymbolDomain {
        marker: usize,
        offset: usize,
        symbol: char,
    },

    #[error("marker {marker}: encoded row has {found} calls, expected an even count of {expected}")]
    ShapeMismatch {
        marker: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid chromosome selection {0:?}; expected N or N-M within 1-23")]
    InvalidChromosomeRange(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("matrix shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}
