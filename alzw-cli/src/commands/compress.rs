//! Compress command implementation.

use crate::error::CliResult;
use crate::utils::space_savings;
use alzw_codec::{AlphabetTable, LzwConfig, LzwEncoder};

/// Compress `input` into a complete stream.
pub fn cmd_compress(input: &[u8], alphabet: AlphabetTable, config: LzwConfig) -> CliResult<Vec<u8>> {
    let mut encoder = LzwEncoder::new(alphabet, config)?;
    let compressed = encoder.encode(input)?;

    let stats = encoder.stats();
    tracing::info!(
        policy = %config.policy,
        min_width = config.min_width,
        max_width = config.max_width,
        symbols = stats.symbols,
        codewords = stats.codewords,
        resets = stats.resets,
        evictions = stats.evictions,
        entries = stats.entries,
        bytes = compressed.len(),
        savings_pct = space_savings(input.len(), compressed.len()),
        "compressed"
    );
    Ok(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use alzw_codec::{LzwError, PolicyKind};

    #[test]
    fn test_compress_roundtrip() {
        let alphabet = AlphabetTable::new(*b"ab").unwrap();
        let config = LzwConfig::new(3, 4, PolicyKind::Lfu);
        let input = b"aabbaabbaabb".repeat(20);
        let compressed = cmd_compress(&input, alphabet, config).unwrap();
        assert_eq!(alzw_codec::decompress(&compressed).unwrap(), input);
    }

    #[test]
    fn test_compress_foreign_symbol() {
        let alphabet = AlphabetTable::new(*b"ab").unwrap();
        let err = cmd_compress(b"abc", alphabet, LzwConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            CliError::Codec(LzwError::SymbolNotInAlphabet { symbol: b'c', .. })
        ));
    }
}
