//! Error module for the Brunel network simulator.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum SNNError {
    /// Error for invalid simulation parameters, e.g., an empty network or a non-positive stop time.
    InvalidConfiguration(String),
    /// Error for an output stream that cannot be opened.
    ResourceUnavailable(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for SNNError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SNNError::InvalidConfiguration(e) => write!(f, "Invalid configuration: {}", e),
            SNNError::ResourceUnavailable(e) => write!(f, "Resource unavailable: {}", e),
            SNNError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for SNNError {}

impl From<std::io::Error> for SNNError {
    fn from(e: std::io::Error) -> Self {
        SNNError::IOError(e.to_string())
    }
}

impl From<serde_json::Error> for SNNError {
    fn from(e: serde_json::Error) -> Self {
        SNNError::InvalidConfiguration(e.to_string())
    }
}
