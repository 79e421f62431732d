//! Radix codec error types.

use thiserror::Error;

/// Alphabet and codec errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RadixError {
    /// Alphabet base outside what the codec supports.
    #[error("Unsupported base {base} (supported: 2..={max})")]
    UnsupportedBase {
        /// The alphabet's base.
        base: u32,
        /// Largest base the codec accepts.
        max: u32,
    },

    /// Alphabet declares more digits than it has symbols.
    #[error("Base {base} exceeds the {symbols} symbols of the alphabet")]
    BaseExceedsSymbols {
        /// Declared base.
        base: u32,
        /// Number of symbols supplied.
        symbols: usize,
    },

    /// Malformed alphabet definition.
    #[error("Invalid alphabet: {message}")]
    InvalidAlphabet {
        /// Description of the defect.
        message: String,
    },

    /// Character that is not a digit of the alphabet.
    #[error("Invalid symbol {symbol:?} at position {position}")]
    InvalidSymbol {
        /// The offending character.
        symbol: char,
        /// Character index in the input.
        position: usize,
    },

    /// Negative value passed to the integer encoder.
    #[error("Cannot encode negative value {0}")]
    NegativeValue(i64),

    /// Minimum width too large to allocate.
    #[error("Minimum width {width} is too large")]
    WidthTooLarge {
        /// Requested minimum width in symbols.
        width: usize,
    },

    /// Decoded value does not fit the target integer.
    #[error("Decoded value overflows the target integer")]
    Overflow,

    /// Padding character in the wrong place.
    #[error("Invalid padding at position {position}")]
    InvalidPadding {
        /// Character index of the misplaced padding.
        position: usize,
    },

    /// Padded alphabet given an unpadded final group.
    #[error("Missing padding: input length {length} is not a multiple of 4")]
    MissingPadding {
        /// Input length in characters.
        length: usize,
    },

    /// Input length that no encoding can produce.
    #[error("Invalid encoded length {length}")]
    InvalidLength {
        /// Input length in characters.
        length: usize,
    },
}

/// Result type for radix codec operations.
pub type Result<T> = std::result::Result<T, RadixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RadixError::InvalidSymbol {
            symbol: '*',
            position: 3,
        };
        assert!(err.to_string().contains("'*'"));
        assert!(err.to_string().contains("position 3"));

        let err = RadixError::UnsupportedBase { base: 300, max: 256 };
        assert!(err.to_string().contains("300"));
    }
}
