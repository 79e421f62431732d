//! Fixed base-64 octet encoding per RFC 4648.
//!
//! Every 3 input octets become 4 symbols. A final group of 1 or 2 octets
//! becomes 2 or 3 symbols, followed by `==` or `=` when the alphabet has a
//! padding character.
//!
//! # Padding policy on decode
//!
//! - Alphabets **with** padding require complete 4-symbol groups; `"Zm8"`
//!   is rejected with [`RadixError::MissingPadding`].
//! - Alphabets **without** padding accept 2- and 3-symbol tails; a padding
//!   character is just an invalid symbol to them.
//! - A 1-symbol tail never encodes anything and is always rejected.
//!
//! ```
//! use oxibits_radix::alphabet::{BASE64, BASE64_NOPADDING};
//! use oxibits_radix::base64::{decode64, encode64};
//!
//! assert_eq!(encode64(b"fo", &BASE64).unwrap(), "Zm8=");
//! assert_eq!(encode64(b"fo", &BASE64_NOPADDING).unwrap(), "Zm8");
//! assert_eq!(decode64("Zm8", &BASE64_NOPADDING).unwrap(), b"fo");
//! assert!(decode64("Zm8", &BASE64).is_err());
//! ```

use crate::alphabet::Alphabet;
use crate::error::{RadixError, Result};
use crate::radix::check_base;
use tracing::trace;

/// Number of symbols `encode64` produces for `len` octets.
pub fn encoded_len(len: usize, padded: bool) -> usize {
    if padded {
        len.div_ceil(3) * 4
    } else {
        len / 3 * 4
            + match len % 3 {
                0 => 0,
                1 => 2,
                _ => 3,
            }
    }
}

/// Upper bound on the octets `decode64` produces from `len` symbols.
pub fn decoded_len_estimate(len: usize) -> usize {
    len.div_ceil(4) * 3
}

/// Collect the 64 digit symbols, rejecting alphabets of another base.
fn symbol_table<A: Alphabet + ?Sized>(alphabet: &A) -> Result<[char; 64]> {
    let base = check_base(alphabet)?;
    if base != 64 {
        return Err(RadixError::UnsupportedBase { base, max: 64 });
    }
    let mut table = ['\0'; 64];
    for (value, slot) in table.iter_mut().enumerate() {
        *slot = alphabet
            .symbol(value as u32)
            .ok_or(RadixError::BaseExceedsSymbols {
                base,
                symbols: value,
            })?;
    }
    Ok(table)
}

/// Encode octets as base-64 text.
///
/// Empty input gives an empty string.
///
/// # Errors
///
/// [`RadixError::UnsupportedBase`] if the alphabet's base is not 64.
pub fn encode64<A: Alphabet + ?Sized>(octets: &[u8], alphabet: &A) -> Result<String> {
    let table = symbol_table(alphabet)?;
    let padding = alphabet.padding();
    let mut out = String::with_capacity(encoded_len(octets.len(), padding.is_some()));
    let sextet = |n: u32, shift: u32| table[((n >> shift) & 0x3F) as usize];

    let mut chunks = octets.chunks_exact(3);
    for chunk in &mut chunks {
        let n = (chunk[0] as u32) << 16 | (chunk[1] as u32) << 8 | chunk[2] as u32;
        out.push(sextet(n, 18));
        out.push(sextet(n, 12));
        out.push(sextet(n, 6));
        out.push(sextet(n, 0));
    }

    match *chunks.remainder() {
        [a] => {
            let n = (a as u32) << 16;
            out.push(sextet(n, 18));
            out.push(sextet(n, 12));
            if let Some(p) = padding {
                out.push(p);
                out.push(p);
            }
        }
        [a, b] => {
            let n = (a as u32) << 16 | (b as u32) << 8;
            out.push(sextet(n, 18));
            out.push(sextet(n, 12));
            out.push(sextet(n, 6));
            if let Some(p) = padding {
                out.push(p);
            }
        }
        _ => {}
    }

    Ok(out)
}

/// Decode base-64 text into octets.
///
/// Empty input gives an empty vector. See the [module docs](self) for the
/// padding policy.
///
/// # Errors
///
/// - [`RadixError::InvalidSymbol`] for a character outside the alphabet
/// - [`RadixError::MissingPadding`] for a short final group when the
///   alphabet pads
/// - [`RadixError::InvalidPadding`] for padding anywhere but the end
/// - [`RadixError::InvalidLength`] for a 1-symbol final group
pub fn decode64<A: Alphabet + ?Sized>(text: &str, alphabet: &A) -> Result<Vec<u8>> {
    symbol_table(alphabet)?;
    let padding = alphabet.padding();
    let symbols: Vec<char> = text.chars().collect();
    let length = symbols.len();
    let mut out = Vec::with_capacity(decoded_len_estimate(length));

    let value = |position: usize| {
        let symbol = symbols[position];
        alphabet.code_point(symbol).ok_or_else(|| {
            trace!(%symbol, position, alphabet = alphabet.name(), "invalid base64 symbol");
            RadixError::InvalidSymbol { symbol, position }
        })
    };
    let is_padding = |position: usize| padding == Some(symbols[position]);

    for start in (0..length).step_by(4) {
        let group = (length - start).min(4);
        match group {
            1 => return Err(RadixError::InvalidLength { length }),
            2 | 3 if padding.is_some() => {
                trace!(length, alphabet = alphabet.name(), "unpadded tail for padded alphabet");
                return Err(RadixError::MissingPadding { length });
            }
            _ => {}
        }

        let v0 = value(start)?;
        let v1 = value(start + 1)?;
        out.push((v0 << 2 | v1 >> 4) as u8);
        if group == 2 {
            break;
        }

        let last = start + 4 >= length;
        if group == 4 && is_padding(start + 2) {
            if !last || !is_padding(start + 3) {
                return Err(RadixError::InvalidPadding {
                    position: start + 2,
                });
            }
            break;
        }
        let v2 = value(start + 2)?;
        out.push(((v1 & 0x0F) << 4 | v2 >> 2) as u8);
        if group == 3 {
            break;
        }

        if is_padding(start + 3) {
            if !last {
                return Err(RadixError::InvalidPadding {
                    position: start + 3,
                });
            }
            break;
        }
        let v3 = value(start + 3)?;
        out.push(((v2 & 0x03) << 6 | v3) as u8);
    }

    Ok(out)
}
