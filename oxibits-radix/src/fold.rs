//! Line folding for base-64 text.
//!
//! PEM (RFC 7468) breaks encoded text every 64 characters, MIME (RFC 2045)
//! every 76. Lines are separated by a single LF; no CR is written and the
//! last line has no terminator.

use crate::alphabet::Alphabet;
use crate::base64::{decode64, encode64};
use crate::error::Result;

/// LF (0x0a), the only line separator this module writes or strips.
pub const LF: char = '\n';

/// PEM line length.
pub const PEM_LINE_LENGTH: usize = 64;

/// MIME line length.
pub const MIME_LINE_LENGTH: usize = 76;

/// Line folding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineFold {
    /// Characters per line. Zero disables folding.
    pub period: usize,
}

impl LineFold {
    /// PEM folding, 64 characters per line.
    pub const PEM: Self = Self {
        period: PEM_LINE_LENGTH,
    };

    /// MIME folding, 76 characters per line.
    pub const MIME: Self = Self {
        period: MIME_LINE_LENGTH,
    };

    /// No folding.
    pub const NONE: Self = Self { period: 0 };

    /// Create a folding configuration with `period` characters per line.
    pub const fn new(period: usize) -> Self {
        Self { period }
    }

    /// Check if this configuration folds at all.
    pub const fn is_enabled(&self) -> bool {
        self.period > 0
    }

    /// Fold `text` in place, returning the number of LFs inserted.
    pub fn apply(&self, text: &mut String) -> usize {
        insert_lf(text, self.period)
    }
}

impl Default for LineFold {
    fn default() -> Self {
        Self::NONE
    }
}

/// Insert an LF after every `period` characters of `text`.
///
/// No LF follows the final line, so text of `period` characters or fewer
/// is left alone. A `period` of 0 disables folding. Returns the number of
/// LFs inserted.
pub fn insert_lf(text: &mut String, period: usize) -> usize {
    if period == 0 {
        return 0;
    }
    let length = text.chars().count();
    if length <= period {
        return 0;
    }

    let breaks = (length - 1) / period;
    let mut folded = String::with_capacity(text.len() + breaks);
    for (i, c) in text.chars().enumerate() {
        if i > 0 && i % period == 0 {
            folded.push(LF);
        }
        folded.push(c);
    }
    *text = folded;
    breaks
}

/// Remove every LF from `text`, returning the number removed.
pub fn remove_lf(text: &mut String) -> usize {
    let before = text.len();
    text.retain(|c| c != LF);
    before - text.len()
}

/// Encode `data` and fold the result with `fold`.
pub fn encode64_folded<A: Alphabet + ?Sized>(
    data: &[u8],
    alphabet: &A,
    fold: LineFold,
) -> Result<String> {
    let mut text = encode64(data, alphabet)?;
    fold.apply(&mut text);
    Ok(text)
}

/// Encode `data` as PEM body text, 64 characters per line.
pub fn encode64_pem<A: Alphabet + ?Sized>(data: &[u8], alphabet: &A) -> Result<String> {
    encode64_folded(data, alphabet, LineFold::PEM)
}

/// Encode `data` as MIME body text, 76 characters per line.
pub fn encode64_mime<A: Alphabet + ?Sized>(data: &[u8], alphabet: &A) -> Result<String> {
    encode64_folded(data, alphabet, LineFold::MIME)
}

/// Strip all LFs from `text`, then decode it.
///
/// Accepts the output of [`encode64_pem`], [`encode64_mime`] and any other
/// LF-folded text. CR is not stripped and is rejected as an invalid symbol.
pub fn decode64_lf<A: Alphabet + ?Sized>(text: &str, alphabet: &A) -> Result<Vec<u8>> {
    if !text.contains(LF) {
        return decode64(text, alphabet);
    }
    let mut unfolded = text.to_owned();
    remove_lf(&mut unfolded);
    decode64(&unfolded, alphabet)
}
