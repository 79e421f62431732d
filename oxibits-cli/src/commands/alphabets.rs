//! Alphabets command implementation.

use oxibits_radix::{Alphabet, AsciiAlphabet, builtin_alphabets};
use serde::{Deserialize, Serialize};

/// JSON serializable description of an alphabet.
#[derive(Debug, Serialize, Deserialize)]
struct AlphabetJson {
    name: String,
    base: u32,
    symbols: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<char>,
    /// Encoded strings of equal width sort like their values.
    sorted: bool,
}

impl AlphabetJson {
    fn from_alphabet(alphabet: &AsciiAlphabet) -> Self {
        let symbols = alphabet.symbols();
        Self {
            name: alphabet.name().to_string(),
            base: alphabet.base(),
            symbols: symbols.to_string(),
            padding: alphabet.padding(),
            sorted: symbols.as_bytes().windows(2).all(|w| w[0] < w[1]),
        }
    }
}

pub fn cmd_alphabets(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let alphabets: Vec<AlphabetJson> = builtin_alphabets()
        .into_iter()
        .map(AlphabetJson::from_alphabet)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&alphabets)?);
        return Ok(());
    }

    println!("{:<20} {:>4}  {:<7}  Symbols", "Name", "Base", "Padding");
    println!("{}", "-".repeat(120));
    for alphabet in &alphabets {
        let padding = alphabet
            .padding
            .map(|p| format!("'{p}'"))
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{:<20} {:>4}  {:<7}  {}",
            alphabet.name, alphabet.base, padding, alphabet.symbols
        );
    }
    Ok(())
}
