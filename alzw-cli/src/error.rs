//! CLI error type and exit codes.

use alzw_codec::{ErrorCategory, LzwError};
use std::process;
use thiserror::Error;

/// Exit codes for the CLI.
#[allow(dead_code)]
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

/// Unified error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument / usage errors.
    #[error("{0}")]
    Usage(String),
    /// Unreadable input, alphabet file or unwritable output.
    #[error("{0}")]
    Input(String),
    /// Error from the codec.
    #[error(transparent)]
    Codec(#[from] LzwError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => EXIT_USAGE,
            CliError::Codec(e) if e.category() == ErrorCategory::Argument => EXIT_USAGE,
            CliError::Input(_) | CliError::Codec(_) => EXIT_ERROR,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Input(format!("JSON encode error: {e}"))
    }
}

/// Print error and exit with the appropriate code.
pub fn exit_with_error(err: CliError) -> ! {
    eprintln!("error: {err}");
    process::exit(err.exit_code())
}

pub type CliResult<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Usage("missing --alphabet".into()).exit_code(), EXIT_USAGE);
        assert_eq!(CliError::Input("no such file".into()).exit_code(), EXIT_ERROR);

        let bad_widths = LzwError::InvalidConfig {
            message: "minimum width 9 exceeds maximum width 8".into(),
        };
        assert_eq!(CliError::from(bad_widths).exit_code(), EXIT_USAGE);

        for err in [
            LzwError::EmptyAlphabet,
            LzwError::SymbolNotInAlphabet {
                symbol: b'c',
                offset: 2,
            },
            LzwError::UnexpectedEof { position: 80 },
        ] {
            assert_eq!(CliError::from(err).exit_code(), EXIT_ERROR);
        }
    }

    #[test]
    fn test_codec_message_passes_through() {
        let err = CliError::from(LzwError::SymbolNotInAlphabet {
            symbol: b'c',
            offset: 2,
        });
        assert!(err.to_string().contains("'c'"));
        assert!(err.to_string().contains("offset 2"));
    }
}
