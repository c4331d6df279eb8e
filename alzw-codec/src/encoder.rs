//! LZW encoder (compression).

use crate::alphabet::AlphabetTable;
use crate::bitstream::MsbBitWriter;
use crate::config::LzwConfig;
use crate::dictionary::{Codebook, MatchCursor, Reservation};
use crate::error::{LzwError, Result};
use crate::header::StreamHeader;
use crate::policy::PolicyKind;

/// A codeword as written to the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codeword {
    /// Code value.
    pub code: u32,
    /// Width it was written with.
    pub width: u8,
}

/// Counters describing one encode or decode run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CodecStats {
    /// Input symbols consumed (encoder) or produced (decoder).
    pub symbols: u64,
    /// Codewords written or read, markers included.
    pub codewords: u64,
    /// RESET markers.
    pub resets: u64,
    /// Entries replaced by LRU/LFU.
    pub evictions: u64,
    /// Live entries at the end of the run.
    pub entries: u32,
    /// Width at the end of the run.
    pub width: u8,
}

/// LZW encoder over a fixed alphabet.
#[derive(Debug)]
pub struct LzwEncoder {
    alphabet: AlphabetTable,
    config: LzwConfig,
    stats: CodecStats,
    trace: Option<Vec<Codeword>>,
}

impl LzwEncoder {
    /// Create an encoder; fails if `config` cannot serve `alphabet`.
    pub fn new(alphabet: AlphabetTable, config: LzwConfig) -> Result<Self> {
        config.layout(alphabet.len())?;
        Ok(Self {
            alphabet,
            config,
            stats: CodecStats::default(),
            trace: None,
        })
    }

    /// Record every codeword written by later calls to [`encode`](Self::encode).
    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled.then(Vec::new);
    }

    /// Codewords written by the last run, if tracing is on.
    pub fn trace(&self) -> Option<&[Codeword]> {
        self.trace.as_deref()
    }

    /// Counters for the last run.
    pub fn stats(&self) -> CodecStats {
        self.stats
    }

    /// Compress `input` into a complete stream.
    ///
    /// # Algorithm
    ///
    /// 1. Write the header; empty input stops here
    /// 2. Grow the current match while the extended sequence is known
    /// 3. Otherwise emit the match, learn match + next symbol, restart the
    ///    match at that symbol
    /// 4. Emit the final match, then the EOF marker
    ///
    /// Any symbol outside the alphabet aborts the run.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let layout = self.config.layout(self.alphabet.len())?;
        let mut writer = MsbBitWriter::new();
        StreamHeader::new(self.config, self.alphabet.clone()).write(&mut writer)?;

        self.stats = CodecStats::default();
        if let Some(trace) = self.trace.as_mut() {
            trace.clear();
        }

        let mut symbols = input.iter().enumerate();
        let Some((_, &first)) = symbols.next() else {
            tracing::debug!("empty input, header-only stream");
            return Ok(writer.finish());
        };

        let mut codebook = Codebook::with_prefix_index(layout, self.config.policy);
        let first = self.alphabet.encode_symbol(first, 0)?;
        let mut buffer = vec![first];
        let mut cursor = base_cursor(&codebook, first)?;

        for (offset, &byte) in symbols {
            let symbol = self.alphabet.encode_symbol(byte, offset)?;
            if let Some(next) = codebook.extend(cursor, symbol) {
                buffer.push(symbol);
                cursor = next;
                continue;
            }

            self.emit(&mut writer, &mut codebook, cursor.code())?;
            buffer.push(symbol);
            match codebook.reserve() {
                Reservation::Slot(code) => codebook.assign(code, &buffer)?,
                Reservation::Saturated if self.config.policy == PolicyKind::Reset => {
                    if let Some(reset) = layout.reset_code() {
                        self.write(&mut writer, reset, codebook.width())?;
                    }
                    codebook.reset();
                    self.stats.resets += 1;
                    tracing::debug!(offset, "codebook full, reset");
                }
                Reservation::Saturated => {}
            }

            buffer.clear();
            buffer.push(symbol);
            cursor = base_cursor(&codebook, symbol)?;
        }

        self.emit(&mut writer, &mut codebook, cursor.code())?;
        // The decoder reserves after every data codeword, the last one too,
        // and may widen before reading EOF.
        codebook.reserve();
        self.write(&mut writer, layout.eof_code(), codebook.width())?;

        self.stats.symbols = input.len() as u64;
        self.stats.evictions = codebook.evictions();
        self.stats.entries = codebook.len();
        self.stats.width = codebook.width();
        tracing::debug!(
            symbols = self.stats.symbols,
            codewords = self.stats.codewords,
            bits = writer.bits_written(),
            "encode finished"
        );
        Ok(writer.finish())
    }

    fn emit(&mut self, writer: &mut MsbBitWriter, codebook: &mut Codebook, code: u32) -> Result<()> {
        self.write(writer, code, codebook.width())?;
        codebook.touch(code);
        Ok(())
    }

    fn write(&mut self, writer: &mut MsbBitWriter, code: u32, width: u8) -> Result<()> {
        writer.write_bits(code, width)?;
        self.stats.codewords += 1;
        if let Some(trace) = self.trace.as_mut() {
            trace.push(Codeword { code, width });
        }
        Ok(())
    }
}

fn base_cursor(codebook: &Codebook, symbol: u8) -> Result<MatchCursor> {
    codebook
        .root(symbol)
        .ok_or_else(|| LzwError::internal(format!("no base entry for symbol code {symbol}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::LzwDecoder;

    fn ab() -> AlphabetTable {
        AlphabetTable::new(*b"ab").unwrap()
    }

    fn roundtrip(input: &[u8], config: LzwConfig) -> Vec<u8> {
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        let compressed = encoder.encode(input).unwrap();
        LzwDecoder::new().decode(&compressed).unwrap()
    }

    #[test]
    fn test_encode_empty_is_header_only() {
        let mut encoder = LzwEncoder::new(ab(), LzwConfig::default()).unwrap();
        let compressed = encoder.encode(b"").unwrap();
        assert_eq!(compressed.len(), 11);
        assert_eq!(encoder.stats().codewords, 0);
    }

    #[test]
    fn test_encode_single_symbol() {
        let config = LzwConfig::new(3, 4, PolicyKind::Freeze);
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        encoder.set_trace(true);
        let compressed = encoder.encode(b"b").unwrap();

        // b (1), then EOF (2); the trailing reservation of code 3 keeps 3 bits.
        assert_eq!(
            encoder.trace().unwrap(),
            &[Codeword { code: 1, width: 3 }, Codeword { code: 2, width: 3 }]
        );
        assert_eq!(&compressed[11..], &[0b0010_1000]);
    }

    #[test]
    fn test_encode_known_codes() {
        let config = LzwConfig::new(3, 4, PolicyKind::Freeze);
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        encoder.set_trace(true);
        encoder.encode(b"abab").unwrap();

        // a, b, ab(3), EOF
        let codes: Vec<u32> = encoder.trace().unwrap().iter().map(|c| c.code).collect();
        assert_eq!(codes, vec![0, 1, 3, 2]);
    }

    #[test]
    fn test_encode_rejects_foreign_symbol() {
        let mut encoder = LzwEncoder::new(ab(), LzwConfig::default()).unwrap();
        let err = encoder.encode(b"abc").unwrap_err();
        assert!(matches!(
            err,
            LzwError::SymbolNotInAlphabet {
                symbol: b'c',
                offset: 2
            }
        ));
    }

    #[test]
    fn test_encode_rejects_unfit_config() {
        let alphabet = AlphabetTable::new(0..=255u8).unwrap();
        assert!(LzwEncoder::new(alphabet, LzwConfig::new(8, 12, PolicyKind::Freeze)).is_err());
    }

    #[test]
    fn test_encode_repeating() {
        let config = LzwConfig::new(2, 8, PolicyKind::Freeze);
        let original = vec![b'a'; 500];
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        let compressed = encoder.encode(&original).unwrap();
        assert!(compressed.len() < 50);
        assert_eq!(roundtrip(&original, config), original);
    }

    #[test]
    fn test_encode_reset_emits_marker() {
        let config = LzwConfig::new(2, 3, PolicyKind::Reset);
        let input = b"abbaabbbabababbbaaab".repeat(5);
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        encoder.set_trace(true);
        encoder.encode(&input).unwrap();

        let resets = encoder.trace().unwrap().iter().filter(|c| c.code == 3).count();
        assert!(resets > 0);
        assert_eq!(resets as u64, encoder.stats().resets);
        assert_eq!(roundtrip(&input, config), input);
    }

    #[test]
    fn test_encoder_reusable() {
        let config = LzwConfig::new(3, 5, PolicyKind::Lru);
        let mut encoder = LzwEncoder::new(ab(), config).unwrap();
        let first = encoder.encode(b"abbabbbaab").unwrap();
        let second = encoder.encode(b"abbabbbaab").unwrap();
        assert_eq!(first, second);
    }
}
