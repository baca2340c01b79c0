use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("File format '{0}' not supported")]
    UnsupportedFormat(String),

    #[error("Cannot read input file '{path}': {source}")]
    ReadFailure {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("Parsing data failed: {0}")]
    ParseFailure(String),

    #[error("Row {row}: incorrect length, expected {expected} fields but found {actual}")]
    RowShape {
        row:      usize,
        expected: usize,
        actual:   usize,
    },

    #[error("Row {row}: field '{field}' contains a null byte")]
    InvalidFieldContent { row: usize, field: &'static str },

    #[error("No commands generated")]
    EmptyScript,

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Output file '{0}' already exists")]
    OverwriteDeclined(PathBuf),

    #[error("Cannot write output file '{path}': {source}")]
    WriteFailure {
        path:   PathBuf,
        source: std::io::Error,
    },
}
