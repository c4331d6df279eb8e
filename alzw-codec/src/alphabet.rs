//! Alphabet: the closed set of byte symbols a run accepts.
//!
//! Symbols get dense codes `0..R` in listing order. The codebook and the
//! trie work on these codes, never on raw bytes.

use crate::error::{LzwError, Result};

/// Bidirectional mapping between symbols and their dense codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlphabetTable {
    /// Code -> symbol.
    symbols: Vec<u8>,
    /// Symbol -> code.
    codes: [Option<u8>; 256],
}

impl AlphabetTable {
    /// Build a table from symbols in code order.
    ///
    /// Fails on an empty list or a repeated symbol.
    pub fn new(symbols: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut table = Self {
            symbols: Vec::new(),
            codes: [None; 256],
        };
        for symbol in symbols {
            table.push(symbol, 0)?;
        }
        if table.symbols.is_empty() {
            return Err(LzwError::EmptyAlphabet);
        }
        Ok(table)
    }

    /// Parse an alphabet listing: one symbol per line, in code order.
    ///
    /// Lines end in `\n` with an optional `\r`; blank lines are skipped. The
    /// symbol is a line's first UTF-8 character, which must lie in the
    /// Latin-1 range and is stored as that byte; anything after it is
    /// ignored. A lone byte is taken as is. With `include_line_breaks`, `\r`
    /// and `\n` take codes 0 and 1 ahead of the listed symbols.
    pub fn parse(listing: &[u8], include_line_breaks: bool) -> Result<Self> {
        let mut table = Self {
            symbols: Vec::new(),
            codes: [None; 256],
        };
        if include_line_breaks {
            table.push(b'\r', 0)?;
            table.push(b'\n', 0)?;
        }

        for (index, raw) in listing.split(|&b| b == b'\n').enumerate() {
            let line = raw.strip_suffix(b"\r").unwrap_or(raw);
            if line.is_empty() {
                continue;
            }
            let symbol = parse_symbol(line).ok_or_else(|| LzwError::InvalidSymbol {
                line: index + 1,
                text: String::from_utf8_lossy(line).into_owned(),
            })?;
            table.push(symbol, index + 1)?;
        }

        if table.symbols.is_empty() {
            return Err(LzwError::EmptyAlphabet);
        }
        Ok(table)
    }

    fn push(&mut self, symbol: u8, line: usize) -> Result<()> {
        let slot = &mut self.codes[usize::from(symbol)];
        if slot.is_some() {
            return Err(LzwError::DuplicateSymbol { symbol, line });
        }
        // At most 256 distinct bytes, so the code always fits.
        *slot = Some(self.symbols.len() as u8);
        self.symbols.push(symbol);
        Ok(())
    }

    /// Number of symbols (R).
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in code order.
    pub fn symbols(&self) -> &[u8] {
        &self.symbols
    }

    /// Code of `symbol`, if it belongs to the alphabet.
    #[inline]
    pub fn code_of(&self, symbol: u8) -> Option<u8> {
        self.codes[usize::from(symbol)]
    }

    /// Code of the input byte at `offset`, or `SymbolNotInAlphabet`.
    #[inline]
    pub fn encode_symbol(&self, symbol: u8, offset: usize) -> Result<u8> {
        self.code_of(symbol)
            .ok_or(LzwError::SymbolNotInAlphabet { symbol, offset })
    }

    /// Symbol for `code`.
    #[inline]
    pub fn symbol_of(&self, code: u8) -> Option<u8> {
        self.symbols.get(usize::from(code)).copied()
    }

    /// Append the symbols for a sequence of codes to `out`.
    ///
    /// Codes come from a codebook seeded by this table, so they are in range.
    pub fn decode_into(&self, codes: &[u8], out: &mut Vec<u8>) {
        out.extend(codes.iter().map(|&code| self.symbols[usize::from(code)]));
    }
}

fn parse_symbol(line: &[u8]) -> Option<u8> {
    if let [byte] = line {
        return Some(*byte);
    }
    let ch = String::from_utf8_lossy(line).chars().next()?;
    u8::try_from(u32::from(ch)).ok()
}
