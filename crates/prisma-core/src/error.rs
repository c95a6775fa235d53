//! Error types shared by every prisma processing crate.

use thiserror::Error;

/// Errors reported by signal and image operations.
///
/// Degenerate-but-defined inputs (zero-length transforms, non-positive
/// cutoffs, all-zero normalization) are not errors; they return the
/// documented fallback result instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Two signals combined by one operation have different sample rates.
    #[error("sample rate mismatch: {left} Hz vs {right} Hz")]
    SampleRateMismatch {
        /// Sample rate of the first operand.
        left: u32,
        /// Sample rate of the second operand.
        right: u32,
    },

    /// A waveform, filter, modulation or transform name was not recognised.
    #[error("unknown {kind}: '{name}'")]
    UnknownIdentifier {
        /// Kind of identifier (e.g. "waveform").
        kind: &'static str,
        /// The name that failed to parse.
        name: String,
    },

    /// A numeric parameter is outside its valid domain.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// The operation needs at least one sample to seed its state.
    #[error("{0} requires a non-empty input")]
    EmptyInput(&'static str),
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Create an unknown identifier error.
    pub fn unknown(kind: &'static str, name: impl Into<String>) -> Self {
        Error::UnknownIdentifier {
            kind,
            name: name.into(),
        }
    }
}

/// Convenience result type for prisma operations.
pub type Result<T> = std::result::Result<T, Error>;
