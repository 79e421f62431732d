//! Byte streams over `std::io` readers and writers.
//!
//! [`ReaderByteStream`] adapts any [`Read`] into a forward-only input
//! stream. It cannot seek backwards on its own; instead it keeps a bounded
//! rewind buffer from the last [`set_mark`](ByteStream::set_mark) so the
//! caller can return to the mark, or seek anywhere between the mark and the
//! current position.
//!
//! [`WriterByteStream`] adapts any [`Write`] into an output stream whose
//! position only moves forward.

use crate::error::{OxiBitsError, Result};
use crate::stream::{ByteOrder, ByteStream};
use std::io::{ErrorKind, Read, Write};
use tracing::trace;

/// Scratch size used when skipping forward.
const SKIP_BUFFER_SIZE: usize = 4096;

/// Rewind state kept between a mark and the current position.
#[derive(Debug)]
struct Rewind {
    /// Absolute position of the mark.
    position: u64,
    /// Maximum number of bytes retained.
    read_limit: u64,
    /// Bytes delivered since the mark.
    history: Vec<u8>,
    /// Replay cursor into `history`; equal to `history.len()` when live.
    cursor: usize,
}

/// A read-only, forward-only [`ByteStream`] over a [`Read`].
#[derive(Debug)]
pub struct ReaderByteStream<R: Read> {
    reader: R,
    position: u64,
    rewind: Option<Rewind>,
    eof: bool,
    open: bool,
    byte_order: ByteOrder,
}

impl<R: Read> ReaderByteStream<R> {
    /// Create a new `ReaderByteStream` wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            position: 0,
            rewind: None,
            eof: false,
            open: true,
            byte_order: ByteOrder::Native,
        }
    }

    /// Set the byte order reported to bit stream readers.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this stream and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read from the source, retrying on interruption.
    fn read_source(&mut self, buf: &mut [u8]) -> Result<usize> {
        if self.eof || buf.is_empty() {
            return Ok(0);
        }
        loop {
            match self.reader.read(buf) {
                Ok(0) => {
                    self.eof = true;
                    return Ok(0);
                }
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> ByteStream for ReaderByteStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }

        let mut n = 0;
        if let Some(rw) = self.rewind.as_mut() {
            let pending = rw.history.len() - rw.cursor;
            if pending > 0 {
                n = pending.min(buf.len());
                buf[..n].copy_from_slice(&rw.history[rw.cursor..rw.cursor + n]);
                rw.cursor += n;
            }
        }

        if n < buf.len() {
            let fresh = self.read_source(&mut buf[n..])?;
            if fresh > 0 {
                if let Some(rw) = self.rewind.as_mut() {
                    if (rw.history.len() + fresh) as u64 > rw.read_limit {
                        trace!(
                            mark = rw.position,
                            read_limit = rw.read_limit,
                            "read limit exceeded, dropping mark"
                        );
                        self.rewind = None;
                    } else {
                        rw.history.extend_from_slice(&buf[n..n + fresh]);
                        rw.cursor = rw.history.len();
                    }
                }
            }
            n += fresh;
        }

        self.position += n as u64;
        Ok(n)
    }

    fn write(&mut self, _buf: &[u8]) -> Result<usize> {
        Err(OxiBitsError::illegal_state("stream is not writable"))
    }

    fn seek(&mut self, pos: u64) -> Result<u64> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }

        if pos < self.position {
            // Only reachable through the rewind buffer.
            return match self.rewind.as_mut() {
                Some(rw) if pos >= rw.position => {
                    rw.cursor = (pos - rw.position) as usize;
                    self.position = pos;
                    Ok(pos)
                }
                _ => Err(OxiBitsError::seek_failed(pos)),
            };
        }

        let mut scratch = [0u8; SKIP_BUFFER_SIZE];
        while self.position < pos {
            let chunk = (pos - self.position).min(SKIP_BUFFER_SIZE as u64) as usize;
            if self.read(&mut scratch[..chunk])? == 0 {
                return Err(OxiBitsError::seek_failed(pos));
            }
        }
        Ok(pos)
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_mark(&mut self, read_limit: u64) -> Result<()> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }
        // Keep bytes not yet replayed so they are not lost.
        let pending = match self.rewind.take() {
            Some(rw) => rw.history[rw.cursor..].to_vec(),
            None => Vec::new(),
        };
        if pending.len() as u64 > read_limit {
            return Err(OxiBitsError::illegal_argument(format!(
                "read limit {read_limit} smaller than {} pending replay bytes",
                pending.len()
            )));
        }
        self.rewind = Some(Rewind {
            position: self.position,
            read_limit,
            history: pending,
            cursor: 0,
        });
        Ok(())
    }

    fn seek_mark(&mut self) -> Result<()> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }
        match self.rewind.as_mut() {
            Some(rw) => {
                rw.cursor = 0;
                self.position = rw.position;
                Ok(())
            }
            None => Err(OxiBitsError::MarkInvalid),
        }
    }

    fn mark(&self) -> Option<u64> {
        self.rewind.as_ref().map(|rw| rw.position)
    }

    fn close(&mut self) {
        self.open = false;
        self.rewind = None;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn can_read(&self) -> bool {
        true
    }

    fn can_write(&self) -> bool {
        false
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}

/// A write-only [`ByteStream`] over a [`Write`].
#[derive(Debug)]
pub struct WriterByteStream<W: Write> {
    writer: W,
    position: u64,
    open: bool,
    byte_order: ByteOrder,
}

impl<W: Write> WriterByteStream<W> {
    /// Create a new `WriterByteStream` wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            position: 0,
            open: true,
            byte_order: ByteOrder::Native,
        }
    }

    /// Set the byte order reported to bit stream writers.
    pub fn with_byte_order(mut self, byte_order: ByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Get a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this stream and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ByteStream for WriterByteStream<W> {
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize> {
        Err(OxiBitsError::illegal_state("stream is not readable"))
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }
        self.writer.write_all(buf)?;
        self.position += buf.len() as u64;
        Ok(buf.len())
    }

    fn seek(&mut self, pos: u64) -> Result<u64> {
        if self.open && pos == self.position {
            Ok(pos)
        } else {
            Err(OxiBitsError::seek_failed(pos))
        }
    }

    fn position(&self) -> u64 {
        self.position
    }

    fn set_mark(&mut self, _read_limit: u64) -> Result<()> {
        Err(OxiBitsError::illegal_state("output stream cannot be marked"))
    }

    fn seek_mark(&mut self) -> Result<()> {
        Err(OxiBitsError::MarkInvalid)
    }

    fn mark(&self) -> Option<u64> {
        None
    }

    fn flush(&mut self) -> Result<()> {
        if !self.open {
            return Err(OxiBitsError::StreamClosed);
        }
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if self.open {
            // Best-effort flush on close
            let _ = self.writer.flush();
            self.open = false;
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn can_read(&self) -> bool {
        false
    }

    fn can_write(&self) -> bool {
        true
    }

    fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reader_forward_seek() {
        let mut stream = ReaderByteStream::new(Cursor::new((0u8..32).collect::<Vec<_>>()));
        assert_eq!(stream.seek(10).unwrap(), 10);
        let mut buf = [0u8; 2];
        stream.read(&mut buf).unwrap();
        assert_eq!(buf, [10, 11]);
        assert!(stream.seek(0).is_err());
        assert!(matches!(
            stream.seek(100),
            Err(OxiBitsError::SeekFailed { target: 100 })
        ));
        assert_eq!(stream.position(), 32);
    }

    #[test]
    fn test_reader_mark_rewind() {
        let mut stream = ReaderByteStream::new(Cursor::new((0u8..32).collect::<Vec<_>>()));
        let mut buf = [0u8; 4];
        stream.read(&mut buf).unwrap();
        stream.set_mark(8).unwrap();
        stream.read(&mut buf).unwrap();
        assert_eq!(buf, [4, 5, 6, 7]);

        stream.seek_mark().unwrap();
        assert_eq!(stream.position(), 4);
        let mut wide = [0u8; 6];
        assert_eq!(stream.read(&mut wide).unwrap(), 6);
        assert_eq!(wide, [4, 5, 6, 7, 8, 9]);

        // Backwards within the mark window
        stream.seek(6).unwrap();
        stream.read(&mut buf[..1]).unwrap();
        assert_eq!(buf[0], 6);
    }

    #[test]
    fn test_reader_mark_limit_exceeded() {
        let mut stream = ReaderByteStream::new(Cursor::new(vec![0u8; 32]));
        stream.set_mark(2).unwrap();
        let mut buf = [0u8; 4];
        stream.read(&mut buf).unwrap();
        assert_eq!(stream.mark(), None);
        assert!(matches!(stream.seek_mark(), Err(OxiBitsError::MarkInvalid)));
    }

    #[test]
    fn test_writer_stream() {
        let mut stream = WriterByteStream::new(Vec::new());
        assert_eq!(stream.write(b"abc").unwrap(), 3);
        assert_eq!(stream.position(), 3);
        assert_eq!(stream.seek(3).unwrap(), 3);
        assert!(stream.seek(0).is_err());
        assert!(stream.read(&mut [0u8; 1]).is_err());
        stream.flush().unwrap();
        assert_eq!(stream.into_inner(), b"abc");
    }
}
