//! # alzw-codec: Adaptive LZW over a restricted alphabet
//!
//! LZW compression where the base dictionary is a caller-supplied alphabet
//! instead of all 256 byte values, codewords grow from `min_width` to
//! `max_width` bits, and a policy decides what happens once the codebook is
//! full.
//!
//! ## Features
//!
//! - **Restricted alphabet**: codes start at the alphabet size, not 256
//! - **Variable width**: MSB-first codewords that widen as codes are assigned
//! - **Full-codebook policies**: freeze, reset, LRU and LFU eviction
//! - **Self-describing streams**: a byte-aligned header carries every
//!   parameter the decoder needs
//!
//! ## Stream layout
//!
//! - Header: magic `ALZ`, version, widths, policy tag, alphabet
//! - Codewords: MSB-first, each at the width current when it was written
//! - Reserved codes: EOF = R, and RESET = R + 1 under the reset policy
//! - Learned codes: from the first code after the markers up to
//!   `2^max_width - 1`
//!
//! ## Example
//!
//! ```rust
//! use alzw_codec::{compress, decompress, AlphabetTable, LzwConfig, PolicyKind};
//!
//! let alphabet = AlphabetTable::new(*b"ab").unwrap();
//! let config = LzwConfig::new(3, 4, PolicyKind::Lru);
//!
//! let original = b"abababbbabaaab";
//! let compressed = compress(original, &alphabet, config).unwrap();
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Symbols outside the alphabet
//!
//! Input is validated symbol by symbol; the first foreign byte aborts the
//! run with its offset:
//!
//! ```rust
//! use alzw_codec::{compress, AlphabetTable, LzwConfig, LzwError};
//!
//! let alphabet = AlphabetTable::new(*b"ab").unwrap();
//! let err = compress(b"abc", &alphabet, LzwConfig::default()).unwrap_err();
//! assert!(matches!(err, LzwError::SymbolNotInAlphabet { offset: 2, .. }));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod alphabet;
mod bitstream;
mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod header;
mod policy;
mod trie;

pub use alphabet::AlphabetTable;
pub use bitstream::{MAX_BITS_PER_CALL, MsbBitReader, MsbBitWriter};
pub use config::{CodeLayout, LzwConfig};
pub use decoder::LzwDecoder;
pub use dictionary::{Codebook, MatchCursor, Reservation};
pub use encoder::{CodecStats, Codeword, LzwEncoder};
pub use error::{ErrorCategory, LzwError, Result};
pub use header::{MAGIC, StreamHeader, VERSION};
pub use policy::{EvictionPolicy, FrequencyTable, PolicyKind, RecencyList};
pub use trie::{NodeId, PrefixTrie};

/// Compress `data` over `alphabet` with the given configuration.
///
/// # Example
///
/// ```rust
/// use alzw_codec::{compress, AlphabetTable, LzwConfig};
///
/// let alphabet = AlphabetTable::new(*b"ACGT").unwrap();
/// let data = b"ACGTACGTACGTACGTACGTACGTACGTACGT";
/// let compressed = compress(data, &alphabet, LzwConfig::default()).unwrap();
/// assert!(compressed.len() > 0);
/// ```
pub fn compress(data: &[u8], alphabet: &AlphabetTable, config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(alphabet.clone(), config)?;
    encoder.encode(data)
}

/// Decompress a stream produced by [`compress`].
///
/// Every parameter is read from the stream header.
///
/// # Example
///
/// ```rust
/// use alzw_codec::{compress, decompress, AlphabetTable, LzwConfig, PolicyKind};
///
/// let alphabet = AlphabetTable::new(*b"xy").unwrap();
/// let config = LzwConfig::new(2, 3, PolicyKind::Reset);
/// let original = b"xyyxyxxyyyxyxyxxxyyx".repeat(4);
/// let compressed = compress(&original, &alphabet, config).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), original);
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    LzwDecoder::new().decode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> AlphabetTable {
        AlphabetTable::new(*b"abc").unwrap()
    }

    #[test]
    fn test_roundtrip_default() {
        let original = b"abcabcabcbbbcccaaabacbcab";
        let compressed = compress(original, &abc(), LzwConfig::default()).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_roundtrip_every_policy_tight_widths() {
        let original = b"abcbcacbabbbacacbbacbcbacbbbcaaabcabcbbbcabacbcbaaacb".repeat(6);
        for policy in PolicyKind::ALL {
            let config = LzwConfig::new(3, 4, policy);
            let compressed = compress(&original, &abc(), config).unwrap();
            assert_eq!(
                decompress(&compressed).unwrap(),
                original,
                "policy {policy}"
            );
        }
    }

    #[test]
    fn test_empty_input() {
        let compressed = compress(b"", &abc(), LzwConfig::default()).unwrap();
        assert_eq!(compressed.len(), StreamHeader::new(LzwConfig::default(), abc()).encoded_len());
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_single_symbol() {
        let compressed = compress(b"c", &abc(), LzwConfig::default()).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), b"c");
    }

    #[test]
    fn test_repeating_pattern() {
        let original = vec![b'b'; 1000];
        let compressed = compress(&original, &abc(), LzwConfig::default()).unwrap();
        assert!(compressed.len() < original.len() / 4);
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_full_byte_alphabet() {
        let alphabet = AlphabetTable::new(0..=255u8).unwrap();
        let original: Vec<u8> = (0..=255u8).chain((0..=255u8).rev()).collect();
        let compressed = compress(&original, &alphabet, LzwConfig::default()).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_foreign_symbol_rejected() {
        let err = compress(b"abd", &abc(), LzwConfig::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Symbol);
    }
}
