//! Decode command implementation.

use super::{read_input, resolve_alphabet};
use oxibits_radix::decode64_lf;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub fn cmd_decode(file: Option<&Path>, alphabet: &str) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = resolve_alphabet(alphabet)?;
    let input = read_input(file)?;
    let text = String::from_utf8(input).map_err(|e| format!("input is not text: {e}"))?;
    // Trailing newline from files and pipes is not part of the payload.
    let data = decode64_lf(text.trim_end_matches(['\n', '\r']), alphabet)?;
    debug!(input = text.len(), output = data.len(), "decoded");

    let mut stdout = io::stdout().lock();
    stdout.write_all(&data)?;
    stdout.flush()?;
    Ok(())
}
