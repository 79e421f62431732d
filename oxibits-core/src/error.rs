//! Error types for OxiBits stream operations.
//!
//! Every fallible operation on a [`ByteStream`](crate::stream::ByteStream) or
//! [`Bitstream`](crate::bitstream::Bitstream) reports failure through
//! [`OxiBitsError`]. Nothing in this crate panics on I/O failure or end of
//! stream; the first failure is surfaced to the caller unchanged.

use std::io;
use thiserror::Error;

/// The main error type for OxiBits stream operations.
#[derive(Debug, Error)]
pub enum OxiBitsError {
    /// I/O error from an underlying `std::io` reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// End of stream reached while reading.
    #[error("Unexpected end of stream at bit position {bit_position}")]
    UnexpectedEof {
        /// Bit position where the stream ended.
        bit_position: u64,
    },

    /// A bulk bit transfer stopped before the requested count.
    #[error("Incomplete transfer: requested {requested} bits, transferred {transferred}")]
    Incomplete {
        /// Number of bits requested.
        requested: u64,
        /// Number of bits actually transferred.
        transferred: u64,
    },

    /// Illegal argument, e.g. a stream capability mismatch at construction.
    #[error("Illegal argument: {message}")]
    IllegalArgument {
        /// Description of the misuse.
        message: String,
    },

    /// Operation not permitted in the current state or access mode.
    #[error("Illegal state: {message}")]
    IllegalState {
        /// Description of the state conflict.
        message: String,
    },

    /// Operation on a closed stream.
    #[error("Stream is closed")]
    StreamClosed,

    /// The underlying stream could not be positioned.
    #[error("Seek to byte offset {target} failed")]
    SeekFailed {
        /// Requested absolute byte offset.
        target: u64,
    },

    /// No valid mark to rewind to.
    #[error("No valid mark set (never set, or read limit exceeded)")]
    MarkInvalid,
}

/// Result type alias for OxiBits stream operations.
pub type Result<T> = std::result::Result<T, OxiBitsError>;

impl OxiBitsError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(bit_position: u64) -> Self {
        Self::UnexpectedEof { bit_position }
    }

    /// Create an incomplete transfer error.
    pub fn incomplete(requested: u64, transferred: u64) -> Self {
        Self::Incomplete {
            requested,
            transferred,
        }
    }

    /// Create an illegal argument error.
    pub fn illegal_argument(message: impl Into<String>) -> Self {
        Self::IllegalArgument {
            message: message.into(),
        }
    }

    /// Create an illegal state error.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Create a seek failure error.
    pub fn seek_failed(target: u64) -> Self {
        Self::SeekFailed { target }
    }

    /// Number of bits moved before a short transfer, if this is one.
    pub fn transferred(&self) -> Option<u64> {
        match self {
            Self::Incomplete { transferred, .. } => Some(*transferred),
            Self::UnexpectedEof { .. } => Some(0),
            _ => None,
        }
    }
}
