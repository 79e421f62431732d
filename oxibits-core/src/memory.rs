//! In-memory byte stream.
//!
//! [`MemoryByteStream`] keeps its bytes in a growable `Vec<u8>` and supports
//! reading, writing and random access. It is the default back-end for
//! building and inspecting bit streams in memory.

use crate::error::{OxiBitsError, Result};
use crate::stream::{ByteOrder, ByteStream};

/// A `Vec<u8>` backed [`ByteStream`].
///
/// Writes overwrite existing bytes at the current position and append past
/// the end. Seeking is allowed anywhere within `0..=len`.
#[derive(Debug, Clone)]
pub struct MemoryByteStream {
    /// Stream contents.
    data: Vec<u8>,
    /// Current byte position.
    position: usize,
    /// Marked position and read limit.
    mark: Option<(usize, u64)>,
    readable: bool,
    writable: bool,
    open: bool,
    byte_order: ByteOrder,
}

impl MemoryByteStream {
    /// Create an empty read-write stream.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a read-write stream over existing bytes, positioned at 0.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data,
            position: 0,
            mark: None,
            readable: true,
            writable: true,
            open: true,
            byte_order: ByteOrder::Native,
        }
    }

    /// Create a read-only stream over existing bytes.
    pub fn read_only(data: impl Into<Vec<u8>>) -> Self {
        Self {
            writable: false,
            ..Self::from_vec(data.into())
        }
    }

    /// Create an empty write-only stream.
    pub fn write_only() -> Self {
        Self {
            readable: false,
            ..Self::new()
        }
    }

    /// Set the byte order reported to bit stream readers and writers.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Get the stream contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Get the number of bytes held.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the stream holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the stream and return its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn check_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(OxiBitsError::StreamClosed)
        }
    }
}

impl Default for MemoryByteStream {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteStream for MemoryByteStream {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.check_open()?;
        if !self.readable {
            return Err(OxiBitsError::illegal_state("stream is not readable"));
        }
        let available = self.data.len().saturating_sub(self.position);
        let n = available.min(buf.len());
        buf[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.check_open()?;
        if !self.writable {
            return Err(OxiBitsError::illegal_state("stream is not writable"));
        }
        let end = self.position + buf.len();
        if end > self.data.len() {
            self.data.resize(end, 0);
        }
        self.data[self.position..end].copy_from_slice(buf);
        self.position = end;
        Ok(buf.len())
    }

    fn seek(&mut self, pos: u64) -> Result<u64> {
        self.check_open()?;
        match usize::try_from(pos) {
            Ok(p) if p <= self.data.len() => {
                self.position = p;
                Ok(pos)
            }
            _ => Err(OxiBitsError::seek_failed(pos)),
        }
    }

    fn position(&self) -> u64 {
        self.position as u64
    }

    fn set_mark(&mut self, read_limit: u64) -> Result<()> {
        self.check_open()?;
        self.mark = Some((self.position, read_limit));
        Ok(())
    }

    fn seek_mark(&mut self) -> Result<()> {
        self.check_open()?;
        match self.mark {
            Some((pos, limit)) if (self.position.saturating_sub(pos) as u64) <= limit => {
                self.position = pos;
                Ok(())
            }
            _ => Err(OxiBitsError::MarkInvalid),
        }
    }

    fn mark(&self) -> Option<u64> {
        self.mark.map(|(pos, _)| pos as u64)
    }

    fn close(&mut self) {
        self.open = false;
        self.mark = None;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn can_read(&self) -> bool {
        self.readable
    }

    fn can_write(&self) -> bool {
        self.writable
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}
