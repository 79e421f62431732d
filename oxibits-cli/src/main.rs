//! OxiBits CLI - base64, radix and bit-stream tooling
//!
//! A Pure Rust front-end over the `oxibits-radix` codecs and the `oxibits-core` bit reader.

mod commands;

use clap::{Parser, Subcommand};
use commands::{cmd_alphabets, cmd_bits, cmd_decode, cmd_encode, cmd_radix, cmd_unradix};
use oxibits_radix::LineFold;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "oxibits")]
#[command(author, version, about = "Base64, radix and bit-stream utility")]
#[command(long_about = "
OxiBits encodes octets as base64, integers in any built-in alphabet, and
dumps files bit by bit.

Examples:
  oxibits encode cert.der -w pem
  oxibits decode cert.b64
  oxibits radix 4095 -a natural64 -m 4
  oxibits unradix 00__ -a natural64
  oxibits alphabets --json
  oxibits bits image.bin -n 128 --skip 16
")]
struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a file (or stdin) as base64
    #[command(alias = "e")]
    Encode {
        /// Input file, stdin if omitted
        file: Option<PathBuf>,

        /// Alphabet name (see `oxibits alphabets`)
        #[arg(short, long, default_value = "base64")]
        alphabet: String,

        /// Line wrapping: none, pem, mime or a line length
        #[arg(short, long, default_value = "none", value_parser = parse_wrap)]
        wrap: LineFold,
    },

    /// Decode base64 from a file (or stdin); line feeds are ignored
    #[command(alias = "d")]
    Decode {
        /// Input file, stdin if omitted
        file: Option<PathBuf>,

        /// Alphabet name (see `oxibits alphabets`)
        #[arg(short, long, default_value = "base64")]
        alphabet: String,
    },

    /// Encode a non-negative integer in an alphabet's base
    Radix {
        /// Value to encode
        value: i64,

        /// Alphabet name (see `oxibits alphabets`)
        #[arg(short, long, default_value = "natural64")]
        alphabet: String,

        /// Left pad with the zero symbol to this many characters
        #[arg(short, long, default_value_t = 0)]
        min_width: usize,
    },

    /// Decode an alphabet string back into an integer
    Unradix {
        /// Encoded text
        text: String,

        /// Alphabet name (see `oxibits alphabets`)
        #[arg(short, long, default_value = "natural64")]
        alphabet: String,
    },

    /// List built-in alphabets
    Alphabets {
        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Dump the bits of a file (or stdin), least significant bit first
    Bits {
        /// Input file, stdin if omitted
        file: Option<PathBuf>,

        /// Number of bits to dump
        #[arg(short = 'n', long, default_value_t = 256)]
        count: u64,

        /// Bits to skip before dumping
        #[arg(short, long, default_value_t = 0)]
        skip: u64,
    },
}

/// Parse a `--wrap` argument.
fn parse_wrap(value: &str) -> Result<LineFold, String> {
    match value.to_ascii_lowercase().as_str() {
        "none" | "0" => Ok(LineFold::NONE),
        "pem" => Ok(LineFold::PEM),
        "mime" => Ok(LineFold::MIME),
        other => other
            .parse::<usize>()
            .map(LineFold::new)
            .map_err(|_| format!("expected none, pem, mime or a line length, got '{value}'")),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode {
            file,
            alphabet,
            wrap,
        } => cmd_encode(file.as_deref(), &alphabet, wrap),
        Commands::Decode { file, alphabet } => cmd_decode(file.as_deref(), &alphabet),
        Commands::Radix {
            value,
            alphabet,
            min_width,
        } => cmd_radix(value, &alphabet, min_width),
        Commands::Unradix { text, alphabet } => cmd_unradix(&text, &alphabet),
        Commands::Alphabets { json } => cmd_alphabets(json),
        Commands::Bits { file, count, skip } => cmd_bits(file.as_deref(), count, skip),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_wrap() {
        assert_eq!(parse_wrap("pem"), Ok(LineFold::PEM));
        assert_eq!(parse_wrap("MIME"), Ok(LineFold::MIME));
        assert_eq!(parse_wrap("none"), Ok(LineFold::NONE));
        assert_eq!(parse_wrap("40"), Ok(LineFold::new(40)));
        assert!(parse_wrap("wide").is_err());
    }

    #[test]
    fn test_parse_encode() {
        let cli = Cli::try_parse_from(["oxibits", "encode", "in.bin", "-w", "pem", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Encode { file, wrap, .. } => {
                assert_eq!(file, Some(PathBuf::from("in.bin")));
                assert_eq!(wrap, LineFold::PEM);
            }
            _ => panic!("expected encode"),
        }
    }
}
