//! Expand command implementation.

use crate::error::CliResult;
use alzw_codec::LzwDecoder;

/// Decode a complete stream.
pub fn cmd_expand(input: &[u8]) -> CliResult<Vec<u8>> {
    let mut decoder = LzwDecoder::new();
    let output = decoder.decode(input)?;

    let stats = decoder.stats();
    if let Some(header) = decoder.header() {
        tracing::info!(
            policy = %header.config.policy,
            min_width = header.config.min_width,
            max_width = header.config.max_width,
            alphabet = header.alphabet.len(),
            codewords = stats.codewords,
            resets = stats.resets,
            evictions = stats.evictions,
            bytes = output.len(),
            "expanded"
        );
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, EXIT_ERROR};
    use alzw_codec::{AlphabetTable, LzwConfig, PolicyKind, compress};

    #[test]
    fn test_expand() {
        let alphabet = AlphabetTable::new(*b"01").unwrap();
        let config = LzwConfig::new(2, 5, PolicyKind::Reset);
        let original = b"0110100110010110".repeat(16);
        let compressed = compress(&original, &alphabet, config).unwrap();
        assert_eq!(cmd_expand(&compressed).unwrap(), original);
    }

    #[test]
    fn test_expand_garbage() {
        let err = cmd_expand(b"not a stream").unwrap_err();
        assert!(matches!(err, CliError::Codec(_)));
        assert_eq!(err.exit_code(), EXIT_ERROR);
    }
}
