//! Error types for the recording core.
//!
//! All variants are fatal to the worker that hits them: the loop surfaces
//! the error to its caller without retrying, and a failure mid-record may
//! leave the current file truncated.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriterError {
    /// Cannot open, write, flush, or close an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Compression stream initialization or finalization failure.
    #[error("Compressor error: {0}")]
    Compressor(String),

    /// Filename template expansion produced an unusable path.
    #[error("Path format error: {0}")]
    PathFormat(String),
}
