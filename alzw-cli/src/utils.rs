//! Utility functions for the CLI.

use crate::error::{CliError, CliResult};
use alzw_codec::AlphabetTable;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read all of `path`, or stdin when `None`.
pub fn read_input(path: Option<&Path>) -> CliResult<Vec<u8>> {
    match path {
        Some(path) => fs::read(path)
            .map_err(|e| CliError::Input(format!("cannot read {}: {e}", path.display()))),
        None => {
            let mut data = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut data)
                .map_err(|e| CliError::Input(format!("cannot read stdin: {e}")))?;
            Ok(data)
        }
    }
}

/// Write `data` to `path`, or stdout when `None`.
pub fn write_output(path: Option<&Path>, data: &[u8]) -> CliResult<()> {
    match path {
        Some(path) => fs::write(path, data)
            .map_err(|e| CliError::Input(format!("cannot write {}: {e}", path.display()))),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .map_err(|e| CliError::Input(format!("cannot write stdout: {e}")))
        }
    }
}

/// Load an alphabet file: one symbol per line, line order gives codes.
pub fn load_alphabet(path: &Path, include_line_breaks: bool) -> CliResult<AlphabetTable> {
    let listing = fs::read(path).map_err(|e| {
        CliError::Input(format!("cannot read alphabet file {}: {e}", path.display()))
    })?;
    let alphabet = AlphabetTable::parse(&listing, include_line_breaks)?;
    tracing::info!(
        path = %path.display(),
        symbols = alphabet.len(),
        "alphabet loaded"
    );
    Ok(alphabet)
}

/// Printable form of an alphabet, escaping control bytes.
pub fn describe_symbols(symbols: &[u8]) -> String {
    symbols.escape_ascii().to_string()
}

/// Space saved relative to `original`, in percent.
pub fn space_savings(original: usize, compressed: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}
