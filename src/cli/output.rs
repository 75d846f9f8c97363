//! Renders decoded bytes for the CLI.

use std::io::{self, Write};

use crate::cli::args::OutputFormat;

/// Formats bytes as a tuple: `()`, `(65,)`, `(65, 66)`.
pub fn format_tuple(bytes: &[u8]) -> String {
    match bytes {
        [] => "()".to_string(),
        [b] => format!("({b},)"),
        _ => {
            let items: Vec<String> = bytes.iter().map(u8::to_string).collect();
            format!("({})", items.join(", "))
        }
    }
}

/// Writes `bytes` to `out` in the requested format.
pub fn write_bytes<W: Write>(out: &mut W, bytes: &[u8], format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Tuple => writeln!(out, "{}", format_tuple(bytes)),
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, bytes).map_err(io::Error::from)?;
            writeln!(out)
        }
        OutputFormat::Raw => out.write_all(bytes),
    }
}
