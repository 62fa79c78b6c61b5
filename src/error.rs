//! Error types for the Morton kernel

use crate::morton::MAX_BITS_PER_AXIS;

#[derive(Debug, thiserror::Error)]
pub enum MortonError {
    #[error("Cannot compute bounds of an empty point batch")]
    EmptyBatch,

    #[error("Invalid bits per axis: {bits} (expected 1..={max})", max = MAX_BITS_PER_AXIS)]
    InvalidBitWidth { bits: u32 },

    #[error("Flat coordinate buffer of length {len} is not a multiple of 3")]
    MalformedBuffer { len: usize },

    #[error("Output buffer length mismatch: expected {expected}, got {actual}")]
    OutputLength { expected: usize, actual: usize },

    #[error("Failed to build encoder thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Config parse error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type MortonResult<T> = Result<T, MortonError>;
