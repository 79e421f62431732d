//! Bit-level I/O on top of a [`ByteStream`].
//!
//! [`Bitstream`] reads and writes individual bits, bit fields of up to 64
//! bits, and 8/16/32/64-bit integers through a 64-bit cache. The same
//! instance can be switched between reading and writing.
//!
//! # Bit Ordering
//!
//! Bits are packed LSB-first: the first bit of the stream is the least
//! significant bit of the first byte. A bit field of `n` bits is returned
//! with its first bit in the least significant position.
//!
//! # Cache
//!
//! In read mode the cache holds up to 64 bits fetched from the stream (the
//! size of the last refill is remembered in `last_read_fill`) and
//! `cache_fill` counts the bits not yet consumed. In write mode the cache
//! accumulates bits and `cache_fill` counts the bits written so far; a full
//! cache is written out as 8 little-endian bytes.
//!
//! The logical bit position is therefore
//!
//! ```text
//! read:  stream_position * 8 - cache_fill
//! write: stream_position * 8 + cache_fill
//! ```
//!
//! # Example
//!
//! ```
//! use oxibits_core::bitstream::{AccessMode, Bitstream};
//! use oxibits_core::memory::MemoryByteStream;
//!
//! let mut bits = Bitstream::new(MemoryByteStream::new(), AccessMode::Write).unwrap();
//! bits.write_bits64(3, 0b101).unwrap();
//! bits.write_bits64(4, 0b1100).unwrap();
//! assert_eq!(bits.position(), 7);
//!
//! bits.set_immutable().unwrap();
//! assert_eq!(bits.read_bits64(3).unwrap(), 0b101);
//! assert_eq!(bits.read_bits64(4).unwrap(), 0b1100);
//! ```

use crate::error::{OxiBitsError, Result};
use crate::stream::{ByteOrder, ByteStream};
use std::fmt;
use tracing::{debug, trace};

/// Size of the bit cache in bits.
pub const CACHE_BITS: usize = 64;

/// Direction a [`Bitstream`] currently operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    /// Bits are consumed from the stream.
    Read,
    /// Bits are appended to the stream.
    Write,
}

impl AccessMode {
    /// Get the name of this access mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Cache snapshot taken by [`Bitstream::set_mark`].
#[derive(Debug, Clone, Copy)]
struct MarkState {
    bit_cache: u64,
    cache_fill: usize,
    last_read_fill: usize,
    bit_position: u64,
}

/// Mask selecting the lowest `n` bits, `n <= 64`.
#[inline]
fn low_mask(n: usize) -> u64 {
    if n >= CACHE_BITS {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

/// Read until `buf` is full or the stream reports end of stream.
fn read_full<S: ByteStream + ?Sized>(stream: &mut S, buf: &mut [u8]) -> Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        let n = stream.read(&mut buf[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}

/// Write all of `buf`, failing with a short count if the stream stalls.
fn write_full<S: ByteStream + ?Sized>(stream: &mut S, buf: &[u8]) -> Result<()> {
    let mut total = 0;
    while total < buf.len() {
        let n = stream.write(&buf[total..])?;
        if n == 0 {
            return Err(OxiBitsError::incomplete(
                buf.len() as u64 * 8,
                total as u64 * 8,
            ));
        }
        total += n;
    }
    Ok(())
}

/// A bit-level reader/writer that owns a [`ByteStream`].
///
/// All operations report failure through [`Result`]; a short transfer is
/// reported as [`OxiBitsError::Incomplete`] carrying the number of bits that
/// did get through. The only argument error at construction is a stream
/// that cannot operate in the requested [`AccessMode`].
#[derive(Debug)]
pub struct Bitstream<S: ByteStream> {
    /// Underlying byte stream.
    stream: S,
    /// Current direction.
    access: AccessMode,
    /// Bit cache (LSB-first).
    bit_cache: u64,
    /// Valid bits in the cache (write: written, read: remaining).
    cache_fill: usize,
    /// Size of the last read refill in bits.
    last_read_fill: usize,
    /// Saved cache state for `seek_mark`.
    mark: Option<MarkState>,
}

impl<S: ByteStream> Bitstream<S> {
    /// Create a new `Bitstream` over an open stream.
    ///
    /// # Errors
    ///
    /// Returns [`OxiBitsError::IllegalArgument`] if the stream is closed,
    /// supports neither reading nor writing, or does not support `access`.
    pub fn new(stream: S, access: AccessMode) -> Result<Self> {
        if !stream.is_open() {
            return Err(OxiBitsError::illegal_argument("stream is not open"));
        }
        if !stream.can_read() && !stream.can_write() {
            return Err(OxiBitsError::illegal_argument(
                "stream supports neither read nor write",
            ));
        }
        Self::check_capability(&stream, access)?;

        Ok(Self {
            stream,
            access,
            bit_cache: 0,
            cache_fill: 0,
            last_read_fill: 0,
            mark: None,
        })
    }

    fn check_capability(stream: &S, access: AccessMode) -> Result<()> {
        match access {
            AccessMode::Read if !stream.can_read() => Err(OxiBitsError::illegal_argument(
                "read access requested on a write-only stream",
            )),
            AccessMode::Write if !stream.can_write() => Err(OxiBitsError::illegal_argument(
                "write access requested on a read-only stream",
            )),
            _ => Ok(()),
        }
    }

    /// Get a reference to the underlying stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }

    /// Get a mutable reference to the underlying stream.
    ///
    /// Moving the stream behind the cache's back breaks the position
    /// bookkeeping until the next [`seek`](Self::seek).
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.stream
    }

    /// Flush pending bits and return the underlying stream.
    pub fn into_inner(mut self) -> Result<S> {
        self.flush()?;
        Ok(self.stream)
    }

    /// Current access mode.
    pub fn access(&self) -> AccessMode {
        self.access
    }

    /// Check if the underlying stream supports reading.
    pub fn can_read(&self) -> bool {
        self.stream.can_read()
    }

    /// Check if the underlying stream supports writing.
    pub fn can_write(&self) -> bool {
        self.stream.can_write()
    }

    /// Check if the underlying stream is open.
    pub fn is_open(&self) -> bool {
        self.stream.is_open()
    }

    /// Byte order used for multi-byte reads and writes.
    pub fn byte_order(&self) -> ByteOrder {
        self.stream.byte_order()
    }

    /// Raw cache contents.
    pub fn bit_cache(&self) -> u64 {
        self.bit_cache
    }

    /// Number of valid bits in the cache.
    pub fn cache_fill(&self) -> usize {
        self.cache_fill
    }

    /// Offset of the next bit within the cache.
    pub fn cached_bit_pos(&self) -> usize {
        match self.access {
            AccessMode::Write => self.cache_fill,
            AccessMode::Read => self.last_read_fill - self.cache_fill,
        }
    }

    /// Logical bit position.
    pub fn position(&self) -> u64 {
        let byte_bits = self.stream.position() * 8;
        match self.access {
            AccessMode::Read => byte_bits - self.cache_fill as u64,
            AccessMode::Write => byte_bits + self.cache_fill as u64,
        }
    }

    fn reset_cache(&mut self) {
        self.bit_cache = 0;
        self.cache_fill = 0;
        self.last_read_fill = 0;
    }

    fn ensure(&self, access: AccessMode) -> Result<()> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        if self.access != access {
            return Err(OxiBitsError::illegal_state(format!(
                "{} operation on a stream in {} mode",
                access, self.access
            )));
        }
        Ok(())
    }

    /// Refill the read cache with up to 8 bytes. Returns the bits loaded.
    fn fill_cache(&mut self) -> Result<usize> {
        let mut buf = [0u8; 8];
        let n = read_full(&mut self.stream, &mut buf)?;
        self.bit_cache = u64::from_le_bytes(buf);
        self.last_read_fill = n * 8;
        self.cache_fill = n * 8;
        if n == 0 {
            trace!(position = self.stream.position(), "end of stream on cache refill");
        }
        Ok(self.cache_fill)
    }

    /// Consume `n <= cache_fill` bits from the read cache.
    #[inline]
    fn take_cached(&mut self, n: usize) -> u64 {
        if n == 0 {
            return 0;
        }
        let offset = self.last_read_fill - self.cache_fill;
        self.cache_fill -= n;
        (self.bit_cache >> offset) & low_mask(n)
    }

    /// Write the cache contents, rounded up to whole bytes.
    ///
    /// On a short write the bytes the stream did accept leave the cache, so
    /// a retry continues where the stream stopped.
    fn flush_cache(&mut self) -> Result<()> {
        let nbytes = self.cache_fill.div_ceil(8);
        if nbytes == 0 {
            return Ok(());
        }
        let bytes = (self.bit_cache & low_mask(self.cache_fill)).to_le_bytes();
        if let Err(e) = write_full(&mut self.stream, &bytes[..nbytes]) {
            if let OxiBitsError::Incomplete { transferred, .. } = &e {
                let written = (*transferred as usize).min(self.cache_fill);
                self.bit_cache = if written >= CACHE_BITS {
                    0
                } else {
                    self.bit_cache >> written
                };
                self.cache_fill -= written;
            }
            debug!(
                position = self.stream.position(),
                cache_fill = self.cache_fill,
                error = %e,
                "bit cache flush failed"
            );
            return Err(e);
        }
        self.bit_cache = 0;
        self.cache_fill = 0;
        Ok(())
    }

    /// Read a single bit.
    ///
    /// # Errors
    ///
    /// [`OxiBitsError::UnexpectedEof`] at end of stream.
    pub fn read_bit(&mut self) -> Result<bool> {
        self.ensure(AccessMode::Read)?;
        if self.cache_fill == 0 && self.fill_cache()? == 0 {
            return Err(OxiBitsError::unexpected_eof(self.position()));
        }
        Ok(self.take_cached(1) != 0)
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.ensure(AccessMode::Write)?;
        if self.cache_fill == CACHE_BITS {
            self.flush_cache()?;
        }
        if bit {
            self.bit_cache |= 1u64 << self.cache_fill;
        }
        self.cache_fill += 1;
        if self.cache_fill == CACHE_BITS {
            self.flush_cache()?;
        }
        Ok(())
    }

    /// Read `n <= 64` bits, first bit in the least significant position.
    ///
    /// # Errors
    ///
    /// - [`OxiBitsError::UnexpectedEof`] if no bit could be read
    /// - [`OxiBitsError::Incomplete`] if the stream ended part way; the bits
    ///   that were available are consumed
    pub fn read_bits64(&mut self, n: usize) -> Result<u64> {
        if n > CACHE_BITS {
            return Err(OxiBitsError::illegal_argument(format!(
                "cannot read {n} bits at once (max {CACHE_BITS})"
            )));
        }
        self.ensure(AccessMode::Read)?;
        if n == 0 {
            return Ok(0);
        }
        if self.cache_fill >= n {
            return Ok(self.take_cached(n));
        }

        // Remainder of the old cache, then the rest from a fresh refill.
        let head_len = self.cache_fill;
        let head = self.take_cached(head_len);
        if self.fill_cache()? == 0 {
            return Err(if head_len == 0 {
                OxiBitsError::unexpected_eof(self.position())
            } else {
                OxiBitsError::incomplete(n as u64, head_len as u64)
            });
        }

        let tail_len = n - head_len;
        if self.cache_fill < tail_len {
            let got = self.cache_fill;
            self.take_cached(got);
            return Err(OxiBitsError::incomplete(
                n as u64,
                (head_len + got) as u64,
            ));
        }
        let tail = self.take_cached(tail_len);
        Ok(head | (tail << head_len))
    }

    /// Write the lowest `n <= 64` bits of `bits`, least significant first.
    ///
    /// # Errors
    ///
    /// [`OxiBitsError::Incomplete`] if the cache could not be flushed after
    /// accepting part of the bits. `transferred` counts the bits that went
    /// into the cache; they stay there and [`position`](Self::position)
    /// includes them.
    pub fn write_bits64(&mut self, n: usize, bits: u64) -> Result<()> {
        if n > CACHE_BITS {
            return Err(OxiBitsError::illegal_argument(format!(
                "cannot write {n} bits at once (max {CACHE_BITS})"
            )));
        }
        self.ensure(AccessMode::Write)?;
        if n == 0 {
            return Ok(());
        }
        if self.cache_fill == CACHE_BITS {
            self.flush_cache()?;
        }

        let bits = bits & low_mask(n);
        let free = CACHE_BITS - self.cache_fill;
        self.bit_cache |= bits << self.cache_fill;
        if n < free {
            self.cache_fill += n;
            return Ok(());
        }

        // Cache is full: flush it, then start over with what did not fit.
        self.cache_fill = CACHE_BITS;
        if self.flush_cache().is_err() {
            return Err(OxiBitsError::incomplete(n as u64, free as u64));
        }
        let tail_len = n - free;
        if tail_len > 0 {
            self.bit_cache = bits >> free;
            self.cache_fill = tail_len;
        }
        Ok(())
    }

    /// Read `N` bytes, straight from the stream when the cache is empty.
    fn read_raw<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.ensure(AccessMode::Read)?;
        let mut buf = [0u8; N];
        if self.cache_fill == 0 {
            let n = read_full(&mut self.stream, &mut buf)?;
            if n < N {
                return Err(if n == 0 {
                    OxiBitsError::unexpected_eof(self.position())
                } else {
                    OxiBitsError::incomplete(N as u64 * 8, n as u64 * 8)
                });
            }
        } else {
            let value = self.read_bits64(N * 8)?;
            buf.copy_from_slice(&value.to_le_bytes()[..N]);
        }
        Ok(buf)
    }

    /// Write `bytes` (at most 8), straight to the stream when the cache is empty.
    fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(AccessMode::Write)?;
        if self.cache_fill == 0 {
            write_full(&mut self.stream, bytes)
        } else {
            let mut le = [0u8; 8];
            le[..bytes.len()].copy_from_slice(bytes);
            self.write_bits64(bytes.len() * 8, u64::from_le_bytes(le))
        }
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_raw::<1>()?[0])
    }

    /// Write one byte.
    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.write_raw(&[value])
    }

    /// Read a `u16` in the stream's byte order.
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_raw::<2>()?;
        Ok(match self.byte_order().resolve() {
            ByteOrder::Big => u16::from_be_bytes(bytes),
            _ => u16::from_le_bytes(bytes),
        })
    }

    /// Write a `u16` in the stream's byte order.
    pub fn write_u16(&mut self, value: u16) -> Result<()> {
        let bytes = match self.byte_order().resolve() {
            ByteOrder::Big => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        };
        self.write_raw(&bytes)
    }

    /// Read a `u32` in the stream's byte order.
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_raw::<4>()?;
        Ok(match self.byte_order().resolve() {
            ByteOrder::Big => u32::from_be_bytes(bytes),
            _ => u32::from_le_bytes(bytes),
        })
    }

    /// Write a `u32` in the stream's byte order.
    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        let bytes = match self.byte_order().resolve() {
            ByteOrder::Big => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        };
        self.write_raw(&bytes)
    }

    /// Read a `u64` in the stream's byte order.
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_raw::<8>()?;
        Ok(match self.byte_order().resolve() {
            ByteOrder::Big => u64::from_be_bytes(bytes),
            _ => u64::from_le_bytes(bytes),
        })
    }

    /// Write a `u64` in the stream's byte order.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        let bytes = match self.byte_order().resolve() {
            ByteOrder::Big => value.to_be_bytes(),
            _ => value.to_le_bytes(),
        };
        self.write_raw(&bytes)
    }

    /// Flush pending bits and the underlying stream.
    ///
    /// In write mode a partial cache is written rounded up to whole bytes,
    /// with the unused high bits zeroed, which advances the position to the
    /// next byte boundary.
    ///
    /// # Returns
    ///
    /// `true` if cached bits were written, `false` if there was nothing to do.
    pub fn flush(&mut self) -> Result<bool> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        let flushed = self.access == AccessMode::Write && self.cache_fill > 0;
        if flushed {
            self.flush_cache()?;
        }
        self.stream.flush()?;
        Ok(flushed)
    }

    /// Skip `n` bits.
    ///
    /// In read mode the remaining cache is consumed first, whole 64-bit
    /// chunks are skipped by seeking the stream, and the cache is refilled
    /// for the rest. In write mode `n` zero bits are written.
    ///
    /// # Returns
    ///
    /// The number of bits actually skipped; less than `n` at end of stream.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        match self.access {
            AccessMode::Read => self.skip_read(n),
            AccessMode::Write => self.skip_write(n),
        }
    }

    fn skip_read(&mut self, n: u64) -> Result<u64> {
        self.ensure(AccessMode::Read)?;
        if n <= self.cache_fill as u64 {
            self.cache_fill -= n as usize;
            return Ok(n);
        }

        let mut skipped = self.cache_fill as u64;
        self.cache_fill = 0;
        let mut remaining = n - skipped;

        let chunk_bytes = remaining / CACHE_BITS as u64 * 8;
        if chunk_bytes > 0 {
            let from = self.stream.position();
            match self.stream.seek(from + chunk_bytes) {
                Ok(_) => {
                    skipped += chunk_bytes * 8;
                    remaining -= chunk_bytes * 8;
                }
                Err(e) => {
                    // Read forward through the cache from wherever the seek stopped.
                    let moved = self.stream.position().saturating_sub(from);
                    debug!(requested = n, moved, error = %e, "chunk seek stopped short");
                    skipped += moved * 8;
                    remaining -= moved * 8;
                }
            }
        }

        while remaining > 0 {
            let loaded = self.fill_cache()? as u64;
            if loaded == 0 {
                break;
            }
            let take = loaded.min(remaining);
            self.cache_fill -= take as usize;
            skipped += take;
            remaining -= take;
        }
        Ok(skipped)
    }

    fn skip_write(&mut self, n: u64) -> Result<u64> {
        let mut done = 0;
        while done < n {
            let chunk = (n - done).min(CACHE_BITS as u64);
            match self.write_bits64(chunk as usize, 0) {
                Ok(()) => done += chunk,
                Err(OxiBitsError::Incomplete { transferred, .. }) => {
                    return Ok(done + transferred);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(done)
    }

    /// Move to the absolute bit position `bit_pos`.
    ///
    /// Moving forward is a [`skip`](Self::skip) in either mode. Moving back
    /// in read mode returns to the mark if it lies at or before `bit_pos`,
    /// otherwise rewinds the stream to 0, and skips forward again; a failed
    /// rewind leaves the position unchanged. Moving back in write mode
    /// flushes and only accepts byte aligned targets.
    ///
    /// # Returns
    ///
    /// The new position, equal to `bit_pos`.
    pub fn seek(&mut self, bit_pos: u64) -> Result<u64> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        let current = self.position();
        if bit_pos == current {
            return Ok(current);
        }

        if bit_pos > current {
            let distance = bit_pos - current;
            let skipped = self.skip(distance)?;
            if skipped < distance {
                return Err(OxiBitsError::incomplete(distance, skipped));
            }
            return Ok(bit_pos);
        }

        match self.access {
            AccessMode::Read => {
                let start = self.rewind_before(bit_pos)?;
                let distance = bit_pos - start;
                let skipped = self.skip_read(distance)?;
                if skipped < distance {
                    return Err(OxiBitsError::incomplete(distance, skipped));
                }
                Ok(bit_pos)
            }
            AccessMode::Write => {
                if bit_pos % 8 != 0 {
                    return Err(OxiBitsError::illegal_argument(format!(
                        "write mode seek back to unaligned bit position {bit_pos}"
                    )));
                }
                self.flush()?;
                self.stream.seek(bit_pos / 8)?;
                Ok(bit_pos)
            }
        }
    }

    /// Move the read position back to at most `bit_pos`, returning where it
    /// landed. Uses the mark when it lies at or before `bit_pos`, otherwise
    /// rewinds the stream to 0. Nothing changes if the stream cannot move.
    fn rewind_before(&mut self, bit_pos: u64) -> Result<u64> {
        if let Some(mark) = self.mark {
            if mark.bit_position <= bit_pos && self.seek_mark().is_ok() {
                return Ok(mark.bit_position);
            }
        }
        trace!(from = self.position(), to = bit_pos, "backward seek, rewinding to 0");
        self.stream.seek(0)?;
        self.reset_cache();
        Ok(0)
    }

    /// Mark the current bit position for [`seek_mark`](Self::seek_mark).
    ///
    /// The stream's own mark is set with `read_limit`; the cache is saved
    /// alongside so the rewind restores the exact bit, not just the byte.
    pub fn set_mark(&mut self, read_limit: u64) -> Result<()> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        self.stream.set_mark(read_limit)?;
        self.mark = Some(MarkState {
            bit_cache: self.bit_cache,
            cache_fill: self.cache_fill,
            last_read_fill: self.last_read_fill,
            bit_position: self.position(),
        });
        Ok(())
    }

    /// Return to the bit position saved by [`set_mark`](Self::set_mark).
    pub fn seek_mark(&mut self) -> Result<()> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        let state = self.mark.ok_or(OxiBitsError::MarkInvalid)?;
        if let Err(e) = self.stream.seek_mark() {
            self.mark = None;
            return Err(e);
        }
        self.bit_cache = state.bit_cache;
        self.cache_fill = state.cache_fill;
        self.last_read_fill = state.last_read_fill;
        trace!(position = state.bit_position, "rewound to mark");
        Ok(())
    }

    /// Bit position of the current mark, if still valid.
    pub fn mark(&self) -> Option<u64> {
        self.stream.mark()?;
        self.mark.map(|m| m.bit_position)
    }

    /// Switch between reading and writing.
    ///
    /// Pending writes are flushed, the cache is dropped and the stream is
    /// rewound to 0, so position tracking restarts.
    ///
    /// # Errors
    ///
    /// [`OxiBitsError::IllegalArgument`] if the stream does not support
    /// `access`.
    pub fn set_access(&mut self, access: AccessMode) -> Result<()> {
        if !self.stream.is_open() {
            return Err(OxiBitsError::StreamClosed);
        }
        Self::check_capability(&self.stream, access)?;
        if self.access == AccessMode::Write {
            self.flush()?;
        }
        debug!(from = %self.access, to = %access, "switching access mode");
        self.reset_cache();
        self.mark = None;
        self.access = access;
        self.stream.seek(0)?;
        Ok(())
    }

    /// Switch to read mode, see [`set_access`](Self::set_access).
    pub fn set_immutable(&mut self) -> Result<()> {
        self.set_access(AccessMode::Read)
    }

    /// Flush pending bits, close the stream and reset the cache.
    ///
    /// The stream is closed even if the flush fails; the flush error is
    /// returned.
    pub fn close(&mut self) -> Result<()> {
        if !self.stream.is_open() {
            return Ok(());
        }
        let flushed = if self.access == AccessMode::Write {
            self.flush().map(|_| ())
        } else {
            Ok(())
        };
        self.stream.close();
        self.reset_cache();
        self.mark = None;
        flushed
    }
}

impl<S: ByteStream> fmt::Display for Bitstream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bitstream[{}, bit pos {}, cache[fill {}, pos {}, {:#018x}], byte pos {}, {}]",
            self.access,
            self.position(),
            self.cache_fill,
            self.cached_bit_pos(),
            self.bit_cache,
            self.stream.position(),
            if self.stream.is_open() { "open" } else { "closed" },
        )
    }
}
