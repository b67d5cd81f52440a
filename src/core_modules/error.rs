// THEORY:
// All failure modes of the engine collapse into two small enums. `DetectError`
// covers the scan path: an input that is structurally wrong (missing buffer,
// mismatched length) or a frame in an encoding the classifier cannot read.
// `StoreError` covers configuration persistence, where "nothing persisted yet"
// is an expected, recoverable outcome and real I/O failures surface to the
// caller unretried.
//
// Every error is terminal for its single invocation only. Nothing here ever
// corrupts accumulators, the active configuration, or the frame counter.

use thiserror::Error;

/// Errors from the classification/judging path.
#[derive(Debug, Error)]
pub enum DetectError {
    /// A required input was missing or structurally invalid (e.g. a buffer
    /// whose length does not match its stated dimensions, or a configuration
    /// with `frame_decimation = 0`).
    #[error("missing or invalid argument")]
    InvalidArgument,

    /// The frame is not in the RGB565 encoding the classifier supports.
    #[error("unsupported pixel format")]
    UnsupportedFormat,

    /// A configuration persistence failure, propagated from the store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from configuration persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No configuration has been persisted yet. Recoverable: callers fall
    /// back to the built-in defaults.
    #[error("no persisted configuration found")]
    NotFound,

    /// The persisted blob exists but does not decode to a valid configuration.
    #[error("persisted configuration blob is malformed")]
    Malformed,

    /// An underlying I/O failure in the store.
    #[error("configuration store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
