//! Self-describing stream header.
//!
//! Layout, all fields whole bytes:
//!
//! ```text
//! +-------+---------+------+------+--------+--------------+------------+
//! | "ALZ" | version | minW | maxW | policy | R (u16, BE)  | R symbols  |
//! +-------+---------+------+------+--------+--------------+------------+
//! ```
//!
//! Codewords follow immediately, so the header always ends on a byte
//! boundary.

use crate::alphabet::AlphabetTable;
use crate::bitstream::{MsbBitReader, MsbBitWriter};
use crate::config::{CodeLayout, LzwConfig};
use crate::error::{LzwError, Result};
use crate::policy::PolicyKind;

/// Stream magic.
pub const MAGIC: [u8; 3] = *b"ALZ";

/// Current format version.
pub const VERSION: u8 = 1;

/// Parameters needed to decode a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    /// Widths and policy used by the encoder.
    pub config: LzwConfig,
    /// Symbols in code order.
    pub alphabet: AlphabetTable,
}

impl StreamHeader {
    /// Create a header for `config` and `alphabet`.
    pub fn new(config: LzwConfig, alphabet: AlphabetTable) -> Self {
        Self { config, alphabet }
    }

    /// Size in bytes.
    pub fn encoded_len(&self) -> usize {
        MAGIC.len() + 6 + self.alphabet.len()
    }

    /// Code-space layout described by this header.
    pub fn layout(&self) -> Result<CodeLayout> {
        self.config.layout(self.alphabet.len())
    }

    /// Write the header.
    pub fn write(&self, writer: &mut MsbBitWriter) -> Result<()> {
        for byte in MAGIC {
            writer.write_u8(byte)?;
        }
        writer.write_u8(VERSION)?;
        writer.write_u8(self.config.min_width)?;
        writer.write_u8(self.config.max_width)?;
        writer.write_u8(self.config.policy.tag())?;
        writer.write_bits(self.alphabet.len() as u32, 16)?;
        for &symbol in self.alphabet.symbols() {
            writer.write_u8(symbol)?;
        }
        Ok(())
    }

    /// Read and validate a header.
    pub fn read(reader: &mut MsbBitReader<'_>) -> Result<Self> {
        let truncated = |_| LzwError::header("stream ends inside the header");

        let mut magic = [0u8; 3];
        for byte in &mut magic {
            *byte = reader.read_u8().map_err(truncated)?;
        }
        if magic != MAGIC {
            return Err(LzwError::header(format!(
                "bad magic {magic:02x?}, expected {MAGIC:02x?}"
            )));
        }

        let version = reader.read_u8().map_err(truncated)?;
        if version != VERSION {
            return Err(LzwError::header(format!(
                "unsupported format version {version}"
            )));
        }

        let min_width = reader.read_u8().map_err(truncated)?;
        let max_width = reader.read_u8().map_err(truncated)?;
        let tag = reader.read_u8().map_err(truncated)?;
        let policy = PolicyKind::from_tag(tag)
            .ok_or_else(|| LzwError::header(format!("unknown policy tag {tag}")))?;

        let size = reader.read_bits(16).map_err(truncated)? as usize;
        if size == 0 || size > 256 {
            return Err(LzwError::header(format!("alphabet size {size} is outside 1-256")));
        }
        let mut symbols = Vec::with_capacity(size);
        for _ in 0..size {
            symbols.push(reader.read_u8().map_err(truncated)?);
        }
        let alphabet = AlphabetTable::new(symbols)
            .map_err(|e| LzwError::header(format!("bad alphabet: {e}")))?;

        let header = Self {
            config: LzwConfig::new(min_width, max_width, policy),
            alphabet,
        };
        header
            .layout()
            .map_err(|e| LzwError::header(format!("bad parameters: {e}")))?;
        Ok(header)
    }

    /// Read the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Self::read(&mut MsbBitReader::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StreamHeader {
        StreamHeader::new(
            LzwConfig::new(3, 4, PolicyKind::Lfu),
            AlphabetTable::new(*b"ab").unwrap(),
        )
    }

    fn encode(header: &StreamHeader) -> Vec<u8> {
        let mut writer = MsbBitWriter::new();
        header.write(&mut writer).unwrap();
        writer.finish()
    }

    #[test]
    fn test_header_bytes() {
        let bytes = encode(&sample());
        assert_eq!(bytes, b"ALZ\x01\x03\x04\x03\x00\x02ab");
        assert_eq!(bytes.len(), sample().encoded_len());
    }

    #[test]
    fn test_header_parse() {
        let header = StreamHeader::parse(&encode(&sample())).unwrap();
        assert_eq!(header, sample());
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = encode(&sample());
        bytes[0] = b'X';
        assert!(matches!(
            StreamHeader::parse(&bytes),
            Err(LzwError::InvalidHeader { .. })
        ));
    }

    #[test]
    fn test_truncated_header() {
        let bytes = encode(&sample());
        for len in 0..bytes.len() {
            assert!(matches!(
                StreamHeader::parse(&bytes[..len]),
                Err(LzwError::InvalidHeader { .. })
            ));
        }
    }

    #[test]
    fn test_rejects_bad_fields() {
        let good = encode(&sample());

        let mut bad_policy = good.clone();
        bad_policy[6] = 9;
        let mut bad_widths = good.clone();
        bad_widths[4] = 5;
        let mut duplicate = good.clone();
        duplicate[10] = b'a';
        let mut bad_version = good;
        bad_version[3] = 2;

        for bytes in [bad_policy, bad_widths, duplicate, bad_version] {
            assert!(matches!(
                StreamHeader::parse(&bytes),
                Err(LzwError::InvalidHeader { .. })
            ));
        }
    }
}
