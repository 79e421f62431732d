//! Encode command implementation.

use super::{read_input, resolve_alphabet};
use oxibits_radix::{LineFold, encode64_folded};
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

pub fn cmd_encode(
    file: Option<&Path>,
    alphabet: &str,
    wrap: LineFold,
) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = resolve_alphabet(alphabet)?;
    let data = read_input(file)?;
    let text = encode64_folded(&data, alphabet, wrap)?;
    debug!(
        input = data.len(),
        output = text.len(),
        period = wrap.period,
        "encoded"
    );

    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.is_empty() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
