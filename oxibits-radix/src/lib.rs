//! # OxiBits Radix
//!
//! Positional base codecs for the OxiBits library.
//!
//! - [`alphabet`]: The [`Alphabet`] trait, [`AsciiAlphabet`] and the built-in alphabets
//! - [`radix`]: Integers in any base from 2 to [`MAX_BASE`]
//! - [`base64`]: RFC 4648 octet encoding with optional padding
//! - [`fold`]: PEM/MIME line folding
//! - [`error`]: Error types
//!
//! All codec functions are pure and take the alphabet by reference, so the
//! `'static` built-ins can be shared freely between threads.
//!
//! ## Example
//!
//! ```rust
//! use oxibits_radix::prelude::*;
//!
//! assert_eq!(encode64(b"foobar", &BASE64).unwrap(), "Zm9vYmFy");
//! assert_eq!(decode64("Zm9vYmFy", &BASE64).unwrap(), b"foobar");
//!
//! let id = radix::encode(1_000_000, &ASCII64, 6).unwrap();
//! assert_eq!(radix::decode(&id, &ASCII64).unwrap(), 1_000_000);
//!
//! let pem = encode64_pem(&[0u8; 100], &BASE64).unwrap();
//! assert_eq!(pem.lines().next().map(str::len), Some(64));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod alphabet;
pub mod base64;
pub mod error;
pub mod fold;
pub mod radix;

// Re-exports for convenience
pub use alphabet::{
    ASCII38, ASCII64, ASCII86, Alphabet, AsciiAlphabet, BASE64, BASE64_NOPADDING, BASE64URL,
    BASE64URL_NOPADDING, MAX_BASE, NATURAL64, NATURAL86, builtin_alphabets, lookup,
};
pub use base64::{decode64, decoded_len_estimate, encode64, encoded_len};
pub use error::{RadixError, Result};
pub use fold::{
    LineFold, decode64_lf, encode64_folded, encode64_mime, encode64_pem, insert_lf, remove_lf,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alphabet::{
        ASCII38, ASCII64, ASCII86, Alphabet, AsciiAlphabet, BASE64, BASE64_NOPADDING, BASE64URL,
        BASE64URL_NOPADDING, NATURAL64, NATURAL86,
    };
    pub use crate::base64::{decode64, encode64};
    pub use crate::error::{RadixError, Result};
    pub use crate::fold::{LineFold, decode64_lf, encode64_mime, encode64_pem};
    pub use crate::radix;
}
