//! Command implementations for OxiBits CLI.

pub mod alphabets;
pub mod bits;
pub mod decode;
pub mod encode;
pub mod radix;

pub use alphabets::cmd_alphabets;
pub use bits::cmd_bits;
pub use decode::cmd_decode;
pub use encode::cmd_encode;
pub use radix::{cmd_radix, cmd_unradix};

use oxibits_radix::AsciiAlphabet;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Resolve an alphabet name given on the command line.
pub fn resolve_alphabet(name: &str) -> Result<&'static AsciiAlphabet, String> {
    oxibits_radix::lookup(name)
        .ok_or_else(|| format!("unknown alphabet '{name}' (see `oxibits alphabets`)"))
}

/// Open a file, or stdin when no path is given.
pub fn open_input(file: Option<&Path>) -> io::Result<Box<dyn Read>> {
    Ok(match file {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    })
}

/// Read all of a file, or stdin when no path is given.
pub fn read_input(file: Option<&Path>) -> io::Result<Vec<u8>> {
    let mut data = Vec::new();
    open_input(file)?.read_to_end(&mut data)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxibits_radix::Alphabet;

    #[test]
    fn test_resolve_alphabet() {
        assert_eq!(resolve_alphabet("ASCII38").unwrap().name(), "ascii38");
        assert!(resolve_alphabet("base32").unwrap_err().contains("base32"));
    }
}
