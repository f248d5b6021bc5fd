//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading or writing curve files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for pathdecim_core::Error {
    fn from(e: IoError) -> Self {
        match e {
            IoError::Io(io) => pathdecim_core::Error::Io(io),
            IoError::InvalidFormat { format } => pathdecim_core::Error::UnsupportedFormat(format),
            other => pathdecim_core::Error::InvalidData(other.to_string()),
        }
    }
}
