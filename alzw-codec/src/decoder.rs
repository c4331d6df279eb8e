//! LZW decoder (decompression).
//!
//! The decoder learns each entry one codeword late: the slot is reserved
//! right after a codeword is read, and filled once the next codeword reveals
//! its last symbol.

use crate::bitstream::MsbBitReader;
use crate::dictionary::Codebook;
use crate::encoder::CodecStats;
use crate::error::{LzwError, Result};
use crate::header::StreamHeader;

/// LZW decoder; every parameter comes from the stream header.
#[derive(Debug, Default)]
pub struct LzwDecoder {
    header: Option<StreamHeader>,
    stats: CodecStats,
}

impl LzwDecoder {
    /// Create a new decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Header of the last stream passed to [`decode`](Self::decode).
    pub fn header(&self) -> Option<&StreamHeader> {
        self.header.as_ref()
    }

    /// Counters for the last run.
    pub fn stats(&self) -> CodecStats {
        self.stats
    }

    /// Decode a complete stream.
    ///
    /// A stream that ends right after its header decodes to nothing.
    /// Otherwise codewords are read until EOF; running out of bits first is
    /// [`LzwError::UnexpectedEof`].
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut reader = MsbBitReader::new(input);
        let header = StreamHeader::read(&mut reader)?;
        let layout = header.layout()?;
        let policy = header.config.policy;
        let alphabet = header.alphabet.clone();
        self.header = Some(header);
        self.stats = CodecStats::default();

        let mut output = Vec::new();
        if reader.remaining_bits() == 0 {
            tracing::debug!("header-only stream");
            return Ok(output);
        }

        let mut codebook = Codebook::new(layout, policy);
        let mut previous: Option<Vec<u8>> = None;
        let mut resets = 0u64;
        let mut codewords = 0u64;

        loop {
            let position = reader.bits_read();
            let code = reader.read_bits(codebook.width())?;
            codewords += 1;

            if code == layout.eof_code() {
                break;
            }
            if Some(code) == layout.reset_code() {
                codebook.reset();
                previous = None;
                resets += 1;
                tracing::debug!(position, "reset marker");
                continue;
            }

            let current: Vec<u8> = match (codebook.sequence(code), &previous) {
                (Some(sequence), _) => sequence.to_vec(),
                (None, Some(prev)) if codebook.pending() == Some(code) => {
                    let mut sequence = prev.clone();
                    sequence.push(prev[0]);
                    sequence
                }
                _ => return Err(LzwError::InvalidCode { code, position }),
            };

            if let (Some(pending), Some(prev)) = (codebook.pending(), previous.as_mut()) {
                prev.push(current[0]);
                codebook.assign(pending, prev)?;
            }
            codebook.touch(code);
            alphabet.decode_into(&current, &mut output);
            codebook.reserve();
            previous = Some(current);
        }

        self.stats = CodecStats {
            symbols: output.len() as u64,
            codewords,
            resets,
            evictions: codebook.evictions(),
            entries: codebook.len(),
            width: codebook.width(),
        };
        tracing::debug!(
            symbols = self.stats.symbols,
            codewords,
            bits = reader.bits_read(),
            "decode finished"
        );
        Ok(output)
    }
}
