//! Positional numeral alphabets.
//!
//! An [`Alphabet`] maps digit values `0..base` to symbols and back. The
//! codec functions in [`radix`](crate::radix) and [`base64`](crate::base64)
//! only talk to this trait, so custom alphabets can plug in anywhere.
//!
//! [`AsciiAlphabet`] is the table-driven implementation used by all
//! built-in alphabets:
//!
//! | Name                  | Base | Symbols (in value order)                    | Padding |
//! |-----------------------|------|---------------------------------------------|---------|
//! | `base64`              | 64   | `A-Z a-z 0-9 + /`                           | `=`     |
//! | `base64_nopadding`    | 64   | `A-Z a-z 0-9 + /`                           | none    |
//! | `base64url`           | 64   | `A-Z a-z 0-9 - _`                           | `=`     |
//! | `base64url_nopadding` | 64   | `A-Z a-z 0-9 - _`                           | none    |
//! | `natural64`           | 64   | `0-9 a-z A-Z - _`                           | `=`     |
//! | `natural86`           | 86   | `0-9 a-z A-Z - _` + 22 punctuation symbols  | none    |
//! | `ascii38`             | 38   | `- 0-9 A-Z _`                               | `=`     |
//! | `ascii64`             | 64   | `- 0-9 A-Z _ a-z`                           | `=`     |
//! | `ascii86`             | 86   | natural86 symbols in ASCII order            | none    |
//!
//! The `ascii*` alphabets are sorted by ASCII code, so encoded strings of
//! equal width sort like the numbers they encode.

use crate::error::{RadixError, Result};
use std::borrow::Cow;
use std::fmt;

/// Largest base the codec functions accept.
pub const MAX_BASE: u32 = 256;

/// Marker for "not a symbol" in lookup tables.
const INVALID: u8 = 0xFF;

/// A positional numeral system: ordered digit symbols plus padding policy.
pub trait Alphabet {
    /// Diagnostic name.
    fn name(&self) -> &str;

    /// Number of digits.
    fn base(&self) -> u32;

    /// Symbol string; `symbols()[i]` is the digit for value `i`.
    fn symbols(&self) -> &str;

    /// Padding character for fixed-width base-64 blocks, if any.
    fn padding(&self) -> Option<char>;

    /// Digit value of `symbol`, or `None` if it is not one of the first
    /// `base` symbols.
    fn code_point(&self, symbol: char) -> Option<u32>;

    /// Symbol for digit `value`, or `None` if `value >= base`.
    fn symbol(&self, value: u32) -> Option<char> {
        if value >= self.base() {
            return None;
        }
        self.symbols().chars().nth(value as usize)
    }
}

/// Table-driven alphabet over printable ASCII symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiAlphabet {
    name: Cow<'static, str>,
    symbols: Cow<'static, str>,
    base: u32,
    padding: Option<char>,
    /// ASCII code -> digit value, `INVALID` otherwise.
    lookup: [u8; 128],
}

/// Build the reverse table, rejecting duplicates and non-printable symbols.
const fn build_lookup(symbols: &[u8], base: usize, padding: Option<char>) -> [u8; 128] {
    assert!(base >= 2 && base <= symbols.len(), "base out of range");
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < base {
        let c = symbols[i];
        assert!(c.is_ascii_graphic(), "alphabet symbols must be printable ASCII");
        assert!(table[c as usize] == INVALID, "duplicate alphabet symbol");
        table[c as usize] = i as u8;
        i += 1;
    }
    if let Some(p) = padding {
        assert!(p.is_ascii_graphic(), "padding must be printable ASCII");
        assert!(table[p as usize] == INVALID, "padding collides with a symbol");
    }
    table
}

impl AsciiAlphabet {
    /// Compile-time constructor for static alphabets; base is the symbol count.
    ///
    /// Panics during constant evaluation on a malformed table.
    pub const fn from_static(
        name: &'static str,
        symbols: &'static str,
        padding: Option<char>,
    ) -> Self {
        let bytes = symbols.as_bytes();
        Self {
            name: Cow::Borrowed(name),
            symbols: Cow::Borrowed(symbols),
            base: bytes.len() as u32,
            padding,
            lookup: build_lookup(bytes, bytes.len(), padding),
        }
    }

    /// Create a custom alphabet using the first `base` characters of `symbols`.
    ///
    /// # Errors
    ///
    /// - [`RadixError::BaseExceedsSymbols`] if `symbols` is too short
    /// - [`RadixError::InvalidAlphabet`] for a base below 2, non-printable or
    ///   non-ASCII symbols, duplicates, or padding that is also a digit
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        base: u32,
        symbols: impl Into<Cow<'static, str>>,
        padding: Option<char>,
    ) -> Result<Self> {
        let name = name.into();
        let symbols = symbols.into();
        let bytes = symbols.as_bytes();

        if base < 2 {
            return Err(RadixError::InvalidAlphabet {
                message: format!("base {base} is below 2"),
            });
        }
        if !bytes.iter().all(u8::is_ascii_graphic) {
            return Err(RadixError::InvalidAlphabet {
                message: "symbols must be printable ASCII".to_string(),
            });
        }
        if base as usize > bytes.len() {
            return Err(RadixError::BaseExceedsSymbols {
                base,
                symbols: bytes.len(),
            });
        }

        let mut lookup = [INVALID; 128];
        for (value, &c) in bytes[..base as usize].iter().enumerate() {
            if lookup[c as usize] != INVALID {
                return Err(RadixError::InvalidAlphabet {
                    message: format!("duplicate symbol {:?}", c as char),
                });
            }
            lookup[c as usize] = value as u8;
        }
        if let Some(p) = padding {
            if !p.is_ascii_graphic() || lookup[p as usize] != INVALID {
                return Err(RadixError::InvalidAlphabet {
                    message: format!("padding {p:?} must be printable ASCII and not a digit"),
                });
            }
        }

        Ok(Self {
            name,
            symbols,
            base,
            padding,
            lookup,
        })
    }

    /// Digit value of an ASCII byte.
    #[inline]
    pub fn code_point_byte(&self, byte: u8) -> Option<u32> {
        match self.lookup.get(byte as usize) {
            Some(&v) if v != INVALID => Some(v as u32),
            _ => None,
        }
    }
}

impl Alphabet for AsciiAlphabet {
    fn name(&self) -> &str {
        &self.name
    }

    fn base(&self) -> u32 {
        self.base
    }

    fn symbols(&self) -> &str {
        &self.symbols
    }

    fn padding(&self) -> Option<char> {
        self.padding
    }

    #[inline]
    fn code_point(&self, symbol: char) -> Option<u32> {
        if symbol.is_ascii() {
            self.code_point_byte(symbol as u8)
        } else {
            None
        }
    }

    #[inline]
    fn symbol(&self, value: u32) -> Option<char> {
        if value >= self.base {
            return None;
        }
        self.symbols.as_bytes().get(value as usize).map(|&b| b as char)
    }
}

impl fmt::Display for AsciiAlphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alphabet[{}, base {}, padding ", self.name, self.base)?;
        match self.padding {
            Some(p) => write!(f, "'{p}'")?,
            None => f.write_str("none")?,
        }
        write!(f, "]: {}", &self.symbols[..self.base as usize])
    }
}

/// RFC 4648 base64.
pub static BASE64: AsciiAlphabet = AsciiAlphabet::from_static(
    "base64",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
    Some('='),
);

/// RFC 4648 base64 without padding.
pub static BASE64_NOPADDING: AsciiAlphabet = AsciiAlphabet::from_static(
    "base64_nopadding",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/",
    None,
);

/// RFC 4648 URL and filename safe base64.
pub static BASE64URL: AsciiAlphabet = AsciiAlphabet::from_static(
    "base64url",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
    Some('='),
);

/// RFC 4648 URL and filename safe base64 without padding.
pub static BASE64URL_NOPADDING: AsciiAlphabet = AsciiAlphabet::from_static(
    "base64url_nopadding",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_",
    None,
);

/// URL safe symbols in natural order: digits, lower case, upper case.
pub static NATURAL64: AsciiAlphabet = AsciiAlphabet::from_static(
    "natural64",
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_",
    Some('='),
);

/// [`NATURAL64`] extended by 22 punctuation symbols.
pub static NATURAL86: AsciiAlphabet = AsciiAlphabet::from_static(
    "natural86",
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ-_!#%&()+,/:;<=>?@[]^{}~",
    None,
);

/// File name safe upper case symbols in ASCII order.
pub static ASCII38: AsciiAlphabet = AsciiAlphabet::from_static(
    "ascii38",
    "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_",
    Some('='),
);

/// URL safe symbols in ASCII order.
pub static ASCII64: AsciiAlphabet = AsciiAlphabet::from_static(
    "ascii64",
    "-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz",
    Some('='),
);

/// [`NATURAL86`] symbols in ASCII order.
pub static ASCII86: AsciiAlphabet = AsciiAlphabet::from_static(
    "ascii86",
    "!#%&()+,-/0123456789:;<=>?@ABCDEFGHIJKLMNOPQRSTUVWXYZ[]^_abcdefghijklmnopqrstuvwxyz{}~",
    None,
);

/// All built-in alphabets.
pub fn builtin_alphabets() -> [&'static AsciiAlphabet; 9] {
    [
        &BASE64,
        &BASE64_NOPADDING,
        &BASE64URL,
        &BASE64URL_NOPADDING,
        &NATURAL64,
        &NATURAL86,
        &ASCII38,
        &ASCII64,
        &ASCII86,
    ]
}

/// Find a built-in alphabet by name.
pub fn lookup(name: &str) -> Option<&'static AsciiAlphabet> {
    builtin_alphabets()
        .into_iter()
        .find(|a| a.name().eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bases() {
        let expected = [64, 64, 64, 64, 64, 86, 38, 64, 86];
        for (alphabet, base) in builtin_alphabets().into_iter().zip(expected) {
            assert_eq!(alphabet.base(), base, "{}", alphabet.name());
        }
    }

    #[test]
    fn test_code_point_inverse() {
        for alphabet in builtin_alphabets() {
            for value in 0..alphabet.base() {
                let symbol = alphabet.symbol(value).unwrap();
                assert_eq!(alphabet.code_point(symbol), Some(value), "{alphabet}");
            }
            assert_eq!(alphabet.symbol(alphabet.base()), None);
        }
    }

    #[test]
    fn test_code_point_rejects_foreign() {
        for alphabet in builtin_alphabets() {
            let digits = &alphabet.symbols()[..alphabet.base() as usize];
            for byte in 0u8..=255 {
                let c = byte as char;
                if !digits.contains(c) {
                    assert_eq!(alphabet.code_point(c), None, "{} {c:?}", alphabet.name());
                }
            }
            assert_eq!(alphabet.code_point('é'), None);
        }
    }

    #[test]
    fn test_ascii_alphabets_sorted() {
        for alphabet in [&ASCII38, &ASCII64, &ASCII86] {
            let bytes = alphabet.symbols().as_bytes();
            assert!(bytes.windows(2).all(|w| w[0] < w[1]), "{}", alphabet.name());
        }
    }

    #[test]
    fn test_natural86_and_ascii86_same_set() {
        let mut a: Vec<char> = NATURAL86.symbols().chars().collect();
        let mut b: Vec<char> = ASCII86.symbols().chars().collect();
        a.sort_unstable();
        b.sort_unstable();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rfc4648_positions() {
        assert_eq!(BASE64.code_point('A'), Some(0));
        assert_eq!(BASE64.code_point('a'), Some(26));
        assert_eq!(BASE64.code_point('0'), Some(52));
        assert_eq!(BASE64.code_point('+'), Some(62));
        assert_eq!(BASE64.code_point('/'), Some(63));
        assert_eq!(BASE64.code_point('-'), None);
        assert_eq!(BASE64URL.code_point('-'), Some(62));
        assert_eq!(BASE64URL.code_point('_'), Some(63));
        assert_eq!(BASE64.code_point('='), None);
        assert_eq!(NATURAL64.code_point('0'), Some(0));
        assert_eq!(NATURAL64.code_point('A'), Some(36));
    }

    #[test]
    fn test_custom_alphabet() {
        let hex = AsciiAlphabet::new("hex", 16, "0123456789abcdef", None).unwrap();
        assert_eq!(hex.code_point('f'), Some(15));
        assert_eq!(hex.code_point('g'), None);

        // Only the first `base` symbols are digits
        let octal = AsciiAlphabet::new("octal", 8, "0123456789", None).unwrap();
        assert_eq!(octal.code_point('8'), None);
    }

    #[test]
    fn test_custom_alphabet_errors() {
        assert!(matches!(
            AsciiAlphabet::new("short", 10, "01234", None),
            Err(RadixError::BaseExceedsSymbols {
                base: 10,
                symbols: 5
            })
        ));
        assert!(matches!(
            AsciiAlphabet::new("dup", 3, "aab", None),
            Err(RadixError::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            AsciiAlphabet::new("unary", 1, "0", None),
            Err(RadixError::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            AsciiAlphabet::new("space", 2, "0 ", None),
            Err(RadixError::InvalidAlphabet { .. })
        ));
        assert!(matches!(
            AsciiAlphabet::new("pad", 2, "01", Some('1')),
            Err(RadixError::InvalidAlphabet { .. })
        ));
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("base64url").map(|a| a.name()), Some("base64url"));
        assert_eq!(lookup("ASCII86").map(|a| a.base()), Some(86));
        assert!(lookup("base32").is_none());
    }

    #[test]
    fn test_display() {
        let text = ASCII38.to_string();
        assert!(text.starts_with("alphabet[ascii38, base 38, padding '=']"));
    }
}
