//! Byte stream interface consumed by [`Bitstream`](crate::bitstream::Bitstream).
//!
//! A [`ByteStream`] is a byte-oriented source and/or sink with an absolute
//! byte position, optional random access, and a mark/rewind protocol. The
//! bit stream layer only ever talks to this trait, so any back-end (memory,
//! file, socket, ring buffer) can sit underneath it.
//!
//! Three small back-ends ship with this crate:
//!
//! - [`MemoryByteStream`](crate::memory::MemoryByteStream): `Vec<u8>` backed,
//!   read-write, random access
//! - [`ReaderByteStream`](crate::io_stream::ReaderByteStream): read-only,
//!   forward-only over any [`std::io::Read`], with a bounded rewind buffer
//! - [`WriterByteStream`](crate::io_stream::WriterByteStream): write-only over
//!   any [`std::io::Write`]

use crate::error::Result;
use std::fmt;

/// Byte order of multi-byte values carried by a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ByteOrder {
    /// Least significant byte first.
    Little,
    /// Most significant byte first.
    Big,
    /// Whatever the host uses.
    #[default]
    Native,
}

impl ByteOrder {
    /// Resolve [`ByteOrder::Native`] to the concrete host order.
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native => {
                if cfg!(target_endian = "little") {
                    Self::Little
                } else {
                    Self::Big
                }
            }
            other => other,
        }
    }

    /// Whether this order equals the host order.
    pub const fn is_native(self) -> bool {
        matches!(
            (self.resolve(), Self::Native.resolve()),
            (Self::Little, Self::Little) | (Self::Big, Self::Big)
        )
    }

    /// Get the name of this byte order.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Little => "little",
            Self::Big => "big",
            Self::Native => "native",
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A byte-oriented stream with absolute positioning and a mark protocol.
///
/// Reads return `Ok(0)` at end of stream. A short count is not an error by
/// itself; callers treat `actual < requested` as end-of-stream-or-error.
pub trait ByteStream {
    /// Read up to `buf.len()` bytes, returning the number read.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    /// Write up to `buf.len()` bytes, returning the number written.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;

    /// Move to the absolute byte position `pos`.
    ///
    /// Returns the resulting position. Back-ends that cannot reach `pos`
    /// return [`OxiBitsError::SeekFailed`](crate::error::OxiBitsError::SeekFailed)
    /// and leave the position wherever they stopped.
    fn seek(&mut self, pos: u64) -> Result<u64>;

    /// Current absolute byte position.
    fn position(&self) -> u64;

    /// Remember the current position so [`seek_mark`](ByteStream::seek_mark)
    /// can return to it, as long as no more than `read_limit` bytes are read
    /// in between.
    fn set_mark(&mut self, read_limit: u64) -> Result<()>;

    /// Return to the position saved by [`set_mark`](ByteStream::set_mark).
    fn seek_mark(&mut self) -> Result<()>;

    /// Position of the current mark, if one is valid.
    fn mark(&self) -> Option<u64>;

    /// Push buffered output to the final destination.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Close the stream. Subsequent operations fail.
    fn close(&mut self);

    /// Check if the stream is open.
    fn is_open(&self) -> bool;

    /// Check if the stream supports reading.
    fn can_read(&self) -> bool;

    /// Check if the stream supports writing.
    fn can_write(&self) -> bool;

    /// Byte order used for multi-byte values.
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::Native
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn seek(&mut self, pos: u64) -> Result<u64> {
        (**self).seek(pos)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_mark(&mut self, read_limit: u64) -> Result<()> {
        (**self).set_mark(read_limit)
    }

    fn seek_mark(&mut self) -> Result<()> {
        (**self).seek_mark()
    }

    fn mark(&self) -> Option<u64> {
        (**self).mark()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn can_write(&self) -> bool {
        (**self).can_write()
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        (**self).read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        (**self).write(buf)
    }

    fn seek(&mut self, pos: u64) -> Result<u64> {
        (**self).seek(pos)
    }

    fn position(&self) -> u64 {
        (**self).position()
    }

    fn set_mark(&mut self, read_limit: u64) -> Result<()> {
        (**self).set_mark(read_limit)
    }

    fn seek_mark(&mut self) -> Result<()> {
        (**self).seek_mark()
    }

    fn mark(&self) -> Option<u64> {
        (**self).mark()
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn can_read(&self) -> bool {
        (**self).can_read()
    }

    fn can_write(&self) -> bool {
        (**self).can_write()
    }

    fn byte_order(&self) -> ByteOrder {
        (**self).byte_order()
    }
}
