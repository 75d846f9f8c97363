//! Defines the command-line arguments for the Sextet CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::base64::Strategy;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "sextet",
    version,
    about = "Decode a Base64 document with a combinator grammar."
)]
pub struct SextetArgs {
    /// The Base64 document to decode. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,

    /// How semantic actions are attached to the grammar.
    #[arg(short, long, value_enum, default_value_t = Strategy::Fine)]
    pub strategy: Strategy,

    /// How decoded bytes are written to stdout.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tuple)]
    pub format: OutputFormat,

    /// Log input size and parse progress to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SextetArgs {
    /// The input path, or `None` for stdin.
    pub fn input_path(&self) -> Option<&std::path::Path> {
        self.file
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }
}

/// Output renderings for decoded bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated numbers in parentheses, e.g. `(72, 105)`.
    #[default]
    Tuple,
    /// A JSON array of numbers.
    Json,
    /// The bytes themselves.
    Raw,
}
