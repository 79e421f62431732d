//! # OxiBits Core
//!
//! Core components for the OxiBits library.
//!
//! This crate provides bit-level I/O over an abstract byte stream:
//!
//! - [`stream`]: The [`ByteStream`] interface and [`ByteOrder`]
//! - [`memory`]: `Vec<u8>` backed byte stream
//! - [`io_stream`]: Byte streams over `std::io` readers and writers
//! - [`bitstream`]: [`Bitstream`], the 64-bit cached bit reader/writer
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Bitstream                                               │
//! │     bits, bit fields, u8/u16/u32/u64, seek/skip/mark    │
//! ├─────────────────────────────────────────────────────────┤
//! │ 64-bit cache (LSB-first)                                │
//! ├─────────────────────────────────────────────────────────┤
//! │ ByteStream                                              │
//! │     memory, std::io::Read, std::io::Write, your own     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxibits_core::{AccessMode, Bitstream, MemoryByteStream};
//!
//! let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
//! for _ in 0..100 {
//!     bits.write_bit(true).unwrap();
//! }
//! assert_eq!(bits.position(), 100);
//!
//! bits.set_immutable().unwrap();
//! assert_eq!(bits.read_bits64(64).unwrap(), u64::MAX);
//! assert_eq!(bits.position(), 64);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod io_stream;
pub mod memory;
pub mod stream;

// Re-exports for convenience
pub use bitstream::{AccessMode, Bitstream, CACHE_BITS};
pub use error::{OxiBitsError, Result};
pub use io_stream::{ReaderByteStream, WriterByteStream};
pub use memory::MemoryByteStream;
pub use stream::{ByteOrder, ByteStream};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitstream::{AccessMode, Bitstream};
    pub use crate::error::{OxiBitsError, Result};
    pub use crate::io_stream::{ReaderByteStream, WriterByteStream};
    pub use crate::memory::MemoryByteStream;
    pub use crate::stream::{ByteOrder, ByteStream};
}
