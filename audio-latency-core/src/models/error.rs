use thiserror::Error;

/// Errors surfaced by the comparator core.
///
/// Unresolved sources and short history are not errors: hooks stay pending
/// and windows are zero-filled. Only configuration and settings storage can
/// fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComparatorError {
    #[error("configuration failed: {0}")]
    ConfigurationFailed(String),

    #[error("invalid sample rate: {0} Hz")]
    InvalidSampleRate(u32),

    #[error("storage error: {0}")]
    StorageError(String),
}
