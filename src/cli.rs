//! The Sextet Command-Line Interface.
//!
//! Reads a whole document from a file or stdin, decodes it, and writes the
//! bytes to stdout. Failures are rendered as `miette` reports on stderr.

use std::{
    fs,
    io::{self, Read, Write},
    process,
};

use clap::Parser;
use miette::{IntoDiagnostic, Result};

use crate::base64;

pub mod args;
pub mod output;

use args::SextetArgs;

/// The main entry point for the CLI.
pub fn run() {
    let args = SextetArgs::parse();
    init_logging(args.verbose);

    if let Err(report) = execute(&args) {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .try_init();
}

/// Decodes according to `args`, writing the result to stdout.
pub fn execute(args: &SextetArgs) -> Result<()> {
    let (name, input) = read_input(args)?;
    log::info!("inputsize={}", input.len());
    log::info!("input={}", String::from_utf8_lossy(&input).trim_end());

    let bytes = base64::decode(&input, args.strategy).map_err(|e| e.with_source_name(&name))?;
    log::info!("decoded {} bytes with {} actions", bytes.len(), args.strategy);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::write_bytes(&mut out, &bytes, args.format).into_diagnostic()?;
    out.flush().into_diagnostic()
}

fn read_input(args: &SextetArgs) -> Result<(String, Vec<u8>)> {
    match args.input_path() {
        Some(path) => {
            let input = fs::read(path)
                .into_diagnostic()
                .map_err(|e| e.wrap_err(format!("failed to read {}", path.display())))?;
            Ok((path.display().to_string(), input))
        }
        None => {
            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input).into_diagnostic()?;
            Ok(("<stdin>".to_string(), input))
        }
    }
}
