//! Typed error hierarchy for index construction and (de)serialization.

use thiserror::Error;

/// Errors that can occur while building an index from raw text.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("byte {byte:#04x} at sequence {sequence_index} position {position} is not part of the configured alphabet")]
    InvalidAlphabet {
        byte: u8,
        sequence_index: usize,
        position: usize,
    },

    #[error("sequence {sequence_index} contains the reserved sentinel symbol 0 at position {position}; sentinels are inserted automatically and must not appear in input sequences")]
    InvalidSentinelUsage {
        sequence_index: usize,
        position: usize,
    },

    #[error("internal construction invariant violated: {reason}")]
    InconsistentBuild { reason: String },
}

/// Errors that can occur while loading a previously persisted index.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("format version mismatch: expected {expected}, found {found}")]
    FormatVersionMismatch { expected: u32, found: u32 },

    #[error("length mismatch for field `{field}`: expected {expected}, found {found}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("rank counter for symbol {symbol} is not monotone non-decreasing at index {index}")]
    CounterNotMonotone { symbol: u8, index: usize },

    #[error("failed to read persisted index stream: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "savefile")]
    #[error("savefile deserialization failed: {0}")]
    Savefile(#[from] savefile::SavefileError),
}
