//! Codec error types.

use thiserror::Error;

/// Compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Width or policy parameters that cannot describe a valid stream.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// Bit width outside what the bit channel can carry.
    #[error("Invalid bit width: {0} (must be 1-32)")]
    InvalidBitWidth(u8),

    /// Alphabet listing without a single symbol.
    #[error("Alphabet is empty")]
    EmptyAlphabet,

    /// The same symbol appears twice in an alphabet.
    #[error("Duplicate alphabet symbol '{}' on line {line}", .symbol.escape_ascii())]
    DuplicateSymbol {
        /// Repeated symbol.
        symbol: u8,
        /// 1-based line of the repeat (0 when not read from a listing).
        line: usize,
    },

    /// An alphabet line whose first character is not a Latin-1 symbol.
    #[error("Invalid alphabet symbol {text:?} on line {line}: not a Latin-1 character")]
    InvalidSymbol {
        /// 1-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// Input symbol not covered by the alphabet.
    #[error("Input symbol '{}' (byte {symbol}) at offset {offset} is not in the alphabet", .symbol.escape_ascii())]
    SymbolNotInAlphabet {
        /// Offending byte.
        symbol: u8,
        /// Byte offset in the input.
        offset: usize,
    },

    /// Malformed stream header.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// Codeword that names neither a live entry nor a marker.
    #[error("Invalid code {code} at bit position {position}")]
    InvalidCode {
        /// The codeword read.
        code: u32,
        /// Bit position where the codeword starts.
        position: u64,
    },

    /// Unexpected end of data.
    #[error("Unexpected end of data at bit position {position}")]
    UnexpectedEof {
        /// Bit position where EOF occurred.
        position: u64,
    },

    /// A value does not fit into the requested number of bits.
    #[error("Code {code} does not fit in {width} bits")]
    CodeOverflow {
        /// Value being written.
        code: u32,
        /// Requested width.
        width: u8,
    },

    /// Encoder and decoder codebooks fell out of step.
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of [`LzwError`] used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad parameters, detected before any data is processed.
    Argument,
    /// The alphabet could not be built.
    AlphabetLoad,
    /// The input contains a symbol outside the alphabet.
    Symbol,
    /// The compressed stream is malformed.
    CorruptStream,
    /// I/O failures and broken internal invariants.
    Internal,
}

impl LzwError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidConfig { .. } | Self::InvalidBitWidth(_) => ErrorCategory::Argument,
            Self::EmptyAlphabet | Self::DuplicateSymbol { .. } | Self::InvalidSymbol { .. } => {
                ErrorCategory::AlphabetLoad
            }
            Self::SymbolNotInAlphabet { .. } => ErrorCategory::Symbol,
            Self::InvalidHeader { .. } | Self::InvalidCode { .. } | Self::UnexpectedEof { .. } => {
                ErrorCategory::CorruptStream
            }
            Self::CodeOverflow { .. } | Self::Internal { .. } | Self::Io(_) => {
                ErrorCategory::Internal
            }
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub(crate) fn header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, LzwError>;
