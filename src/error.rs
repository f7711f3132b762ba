//! Error types for the face detection stream demo.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// `OpenCV` operation failed
    #[error("OpenCV error: {0}")]
    OpenCV(#[from] opencv::Error),

    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Model loading or construction error
    #[error("Model error: {0}")]
    ModelError(String),

    /// Image handed to the detector does not match its configured input size
    #[error("Input size mismatch: detector expects {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    InputSizeMismatch {
        /// Width the detector was configured with
        expected_width: i32,
        /// Height the detector was configured with
        expected_height: i32,
        /// Width of the offending image
        actual_width: i32,
        /// Height of the offending image
        actual_height: i32,
    },

    /// Video capture could not be opened
    #[error("Failed to open video capture: {0}")]
    CaptureOpen(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic I/O error with description
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
