//! Integer encoding in an arbitrary positional base.
//!
//! Digits are written most significant first, exactly like decimal
//! notation, using the alphabet's symbol for each digit value. Leading
//! zero symbols pad the result to a minimum width and decode to the same
//! value.
//!
//! ```
//! use oxibits_radix::{alphabet::NATURAL64, radix};
//!
//! let text = radix::encode(4095, &NATURAL64, 4).unwrap();
//! assert_eq!(text, "00__");
//! assert_eq!(radix::decode(&text, &NATURAL64).unwrap(), 4095);
//! ```

use crate::alphabet::{Alphabet, MAX_BASE};
use crate::error::{RadixError, Result};

/// Validate the alphabet's base against the codec limits.
pub(crate) fn check_base<A: Alphabet + ?Sized>(alphabet: &A) -> Result<u32> {
    let base = alphabet.base();
    if !(2..=MAX_BASE).contains(&base) {
        return Err(RadixError::UnsupportedBase {
            base,
            max: MAX_BASE,
        });
    }
    let symbols = alphabet.symbols().chars().count();
    if base as usize > symbols {
        return Err(RadixError::BaseExceedsSymbols { base, symbols });
    }
    Ok(base)
}

/// Encode a non-negative `value`, left padded with the zero symbol to at
/// least `min_width` symbols.
///
/// # Errors
///
/// [`RadixError::NegativeValue`] for `value < 0`, a base error for an
/// alphabet outside `2..=MAX_BASE`, or [`RadixError::WidthTooLarge`] if the
/// padding cannot be allocated.
pub fn encode<A: Alphabet + ?Sized>(value: i64, alphabet: &A, min_width: usize) -> Result<String> {
    if value < 0 {
        return Err(RadixError::NegativeValue(value));
    }
    encode_u64(value as u64, alphabet, min_width)
}

/// Encode an unsigned `value`, see [`encode`].
pub fn encode_u64<A: Alphabet + ?Sized>(
    value: u64,
    alphabet: &A,
    min_width: usize,
) -> Result<String> {
    let base = check_base(alphabet)? as u64;
    let digit = |d: u64| {
        alphabet
            .symbol(d as u32)
            .ok_or_else(|| RadixError::InvalidAlphabet {
                message: format!("no symbol for digit {d} in {}", alphabet.name()),
            })
    };

    // Least significant digit first, reversed at the end.
    let mut digits = Vec::with_capacity(64);
    let mut rest = value;
    loop {
        digits.push(digit(rest % base)?);
        rest /= base;
        if rest == 0 {
            break;
        }
    }
    if digits.len() < min_width {
        let zero = digit(0)?;
        digits
            .try_reserve_exact(min_width - digits.len())
            .map_err(|_| RadixError::WidthTooLarge { width: min_width })?;
        digits.resize(min_width, zero);
    }
    Ok(digits.iter().rev().collect())
}

/// Decode a symbol string into a non-negative `i64`.
///
/// The empty string decodes to 0.
///
/// # Errors
///
/// - [`RadixError::InvalidSymbol`] for a character outside the alphabet
/// - [`RadixError::Overflow`] if the value exceeds `i64::MAX`
pub fn decode<A: Alphabet + ?Sized>(text: &str, alphabet: &A) -> Result<i64> {
    let value = decode_u64(text, alphabet)?;
    i64::try_from(value).map_err(|_| RadixError::Overflow)
}

/// Decode a symbol string into a `u64`, see [`decode`].
pub fn decode_u64<A: Alphabet + ?Sized>(text: &str, alphabet: &A) -> Result<u64> {
    let base = check_base(alphabet)? as u64;
    let mut result: u64 = 0;
    for (position, symbol) in text.chars().enumerate() {
        let digit = alphabet
            .code_point(symbol)
            .ok_or(RadixError::InvalidSymbol { symbol, position })?;
        result = result
            .checked_mul(base)
            .and_then(|r| r.checked_add(digit as u64))
            .ok_or(RadixError::Overflow)?;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::{
        ASCII38, ASCII64, ASCII86, AsciiAlphabet, BASE64, NATURAL64, NATURAL86, builtin_alphabets,
    };

    #[test]
    fn test_zero() {
        for alphabet in builtin_alphabets() {
            let zero = alphabet.symbol(0).unwrap().to_string();
            assert_eq!(encode(0, alphabet, 0).unwrap(), zero);
            assert_eq!(encode(0, alphabet, 1).unwrap(), zero);
            assert_eq!(decode(&zero, alphabet).unwrap(), 0);
        }
    }

    #[test]
    fn test_min_width_padding() {
        assert_eq!(encode(0, &NATURAL64, 3).unwrap(), "000");
        assert_eq!(encode(1, &BASE64, 4).unwrap(), "AAAB");
        assert_eq!(encode(63, &ASCII64, 2).unwrap(), "-z");
        assert_eq!(decode("-z", &ASCII64).unwrap(), 63);
        assert_eq!(decode("000z", &NATURAL64).unwrap(), 35);
    }

    #[test]
    fn test_place_value() {
        assert_eq!(encode(64, &NATURAL64, 0).unwrap(), "10");
        assert_eq!(encode(86 * 86 - 1, &NATURAL86, 0).unwrap(), "~~");
        assert_eq!(encode(37, &ASCII38, 0).unwrap(), "_");
        assert_eq!(encode(38, &ASCII38, 0).unwrap(), "0-");
    }

    #[test]
    fn test_roundtrip_boundaries() {
        for alphabet in builtin_alphabets() {
            let base = alphabet.base() as i64;
            for value in [0, 1, base - 1, base, base * base - 1, 1 << 40, i64::MAX] {
                for width in [0, 1, 5, 20] {
                    let text = encode(value, alphabet, width).unwrap();
                    assert!(text.chars().count() >= width);
                    assert_eq!(decode(&text, alphabet).unwrap(), value, "{}", alphabet.name());
                }
            }
        }
    }

    #[test]
    fn test_i64_max() {
        let text = encode(i64::MAX, &ASCII86, 0).unwrap();
        assert_eq!(decode(&text, &ASCII86).unwrap(), i64::MAX);
        let text = encode(i64::MAX, &BASE64, 0).unwrap();
        assert_eq!(text, "H//////////");
    }

    #[test]
    fn test_u64_range() {
        let text = encode_u64(u64::MAX, &NATURAL64, 0).unwrap();
        assert_eq!(decode_u64(&text, &NATURAL64).unwrap(), u64::MAX);
        assert_eq!(decode(&text, &NATURAL64), Err(RadixError::Overflow));
        assert_eq!(decode_u64("__________", &NATURAL64).unwrap(), (1 << 60) - 1);
        assert_eq!(
            decode_u64("____________", &NATURAL64),
            Err(RadixError::Overflow)
        );
    }

    #[test]
    fn test_ascii_order_preserved() {
        let mut previous = String::new();
        for value in (0..5000).step_by(7) {
            let text = encode(value, &ASCII64, 4).unwrap();
            assert!(text > previous);
            previous = text;
        }
    }

    #[test]
    fn test_huge_min_width() {
        assert_eq!(
            encode(1, &BASE64, usize::MAX),
            Err(RadixError::WidthTooLarge { width: usize::MAX })
        );
        assert_eq!(
            encode_u64(7, &NATURAL64, usize::MAX / 2),
            Err(RadixError::WidthTooLarge {
                width: usize::MAX / 2
            })
        );
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(encode(-1, &BASE64, 0), Err(RadixError::NegativeValue(-1)));
    }

    #[test]
    fn test_invalid_symbol() {
        assert_eq!(
            decode("12*4", &NATURAL64),
            Err(RadixError::InvalidSymbol {
                symbol: '*',
                position: 2
            })
        );
        // `=` is padding, not a digit
        assert!(decode("A=", &BASE64).is_err());
    }

    #[test]
    fn test_empty_decodes_to_zero() {
        assert_eq!(decode("", &BASE64).unwrap(), 0);
    }

    #[test]
    fn test_custom_base() {
        let binary = AsciiAlphabet::new("binary", 2, "01", None).unwrap();
        assert_eq!(encode(10, &binary, 8).unwrap(), "00001010");
        assert_eq!(decode("1111", &binary).unwrap(), 15);
    }

    /// Alphabet with a base the codec refuses.
    struct Wide;

    impl Alphabet for Wide {
        fn name(&self) -> &str {
            "wide"
        }
        fn base(&self) -> u32 {
            MAX_BASE + 1
        }
        fn symbols(&self) -> &str {
            ""
        }
        fn padding(&self) -> Option<char> {
            None
        }
        fn code_point(&self, _symbol: char) -> Option<u32> {
            None
        }
    }

    #[test]
    fn test_unsupported_base() {
        assert!(matches!(
            encode(5, &Wide, 0),
            Err(RadixError::UnsupportedBase { .. })
        ));
        assert!(matches!(
            decode("x", &Wide),
            Err(RadixError::UnsupportedBase { .. })
        ));
    }

    #[test]
    fn test_dyn_alphabet() {
        let alphabet: &dyn Alphabet = &NATURAL86;
        let text = encode(123_456_789, alphabet, 0).unwrap();
        assert_eq!(decode(&text, alphabet).unwrap(), 123_456_789);
    }
}
