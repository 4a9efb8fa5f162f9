//! Typed error enum for the imaging crate.

use thiserror::Error;

/// Errors from image processing calls.
#[derive(Debug, Error)]
pub enum ImagingError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    CommandFailed { program: String, status: String, stderr: String },
    #[error("unexpected output from {program}: {output:?}")]
    UnexpectedOutput { program: String, output: String },
    #[error("image has no usable size: {0}")]
    EmptyImage(String),
}
