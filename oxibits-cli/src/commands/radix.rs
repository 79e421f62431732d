//! Radix and unradix command implementations.

use super::resolve_alphabet;
use oxibits_radix::radix;

pub fn cmd_radix(
    value: i64,
    alphabet: &str,
    min_width: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = resolve_alphabet(alphabet)?;
    println!("{}", radix::encode(value, alphabet, min_width)?);
    Ok(())
}

pub fn cmd_unradix(text: &str, alphabet: &str) -> Result<(), Box<dyn std::error::Error>> {
    let alphabet = resolve_alphabet(alphabet)?;
    println!("{}", radix::decode(text.trim(), alphabet)?);
    Ok(())
}
