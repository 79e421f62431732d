//! Bits command implementation.

use super::open_input;
use oxibits_core::{AccessMode, Bitstream, ByteStream, OxiBitsError, ReaderByteStream};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

/// Bits per output line.
const LINE_BITS: u64 = 64;

pub fn cmd_bits(
    file: Option<&Path>,
    count: u64,
    skip: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let stream = ReaderByteStream::new(open_input(file)?);
    let mut bits = Bitstream::new(stream, AccessMode::Read)?;

    let skipped = bits.skip(skip)?;
    if skipped < skip {
        debug!(skip, skipped, "input ends before the skip target");
    }

    let mut stdout = io::stdout().lock();
    let dumped = dump_bits(&mut bits, count, &mut stdout)?;
    stdout.flush()?;
    debug!(dumped, "{bits}");
    Ok(())
}

/// Write up to `count` bits as lines of `0`/`1` in groups of 8, each line
/// prefixed with its bit offset. Returns the number of bits written.
fn dump_bits<S: ByteStream>(
    bits: &mut Bitstream<S>,
    count: u64,
    out: &mut impl Write,
) -> Result<u64, Box<dyn std::error::Error>> {
    let mut dumped = 0;
    let mut line = String::with_capacity(LINE_BITS as usize + 16);

    while dumped < count {
        let bit = match bits.read_bit() {
            Ok(bit) => bit,
            Err(OxiBitsError::UnexpectedEof { .. }) => break,
            Err(e) => return Err(e.into()),
        };
        if dumped % LINE_BITS == 0 {
            if !line.is_empty() {
                writeln!(out, "{line}")?;
                line.clear();
            }
            line.push_str(&format!("{:>10}:", bits.position() - 1));
        }
        if dumped % 8 == 0 {
            line.push(' ');
        }
        line.push(if bit { '1' } else { '0' });
        dumped += 1;
    }
    if !line.is_empty() {
        writeln!(out, "{line}")?;
    }
    Ok(dumped)
}
