//! Codec configuration and the code-space layout derived from it.

use crate::error::{LzwError, Result};
use crate::policy::PolicyKind;

/// Width and policy parameters for a compression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    /// Initial codeword width in bits.
    pub min_width: u8,
    /// Final codeword width; the codebook holds `2^max_width` codes.
    pub max_width: u8,
    /// What happens once the codebook is full.
    pub policy: PolicyKind,
}

impl LzwConfig {
    /// Smallest accepted `min_width`.
    pub const MIN_WIDTH: u8 = 2;

    /// Largest accepted `max_width`.
    pub const MAX_WIDTH: u8 = 24;

    /// 9 to 16 bit codes, freezing when full.
    pub const DEFAULT: Self = Self {
        min_width: 9,
        max_width: 16,
        policy: PolicyKind::Freeze,
    };

    /// Create a new configuration.
    pub fn new(min_width: u8, max_width: u8, policy: PolicyKind) -> Self {
        Self {
            min_width,
            max_width,
            policy,
        }
    }

    /// Check the width bounds on their own.
    pub fn validate(&self) -> Result<()> {
        if self.min_width < Self::MIN_WIDTH {
            return Err(LzwError::config(format!(
                "minimum width {} is below {}",
                self.min_width,
                Self::MIN_WIDTH
            )));
        }
        if self.max_width > Self::MAX_WIDTH {
            return Err(LzwError::config(format!(
                "maximum width {} exceeds {}",
                self.max_width,
                Self::MAX_WIDTH
            )));
        }
        if self.min_width > self.max_width {
            return Err(LzwError::config(format!(
                "minimum width {} exceeds maximum width {}",
                self.min_width, self.max_width
            )));
        }
        Ok(())
    }

    /// Derive the code-space layout for an alphabet of `alphabet_size`
    /// symbols.
    ///
    /// Base codes must be writable at `min_width`; the markers only need to
    /// fit below `2^max_width`, since the codebook widens before the first
    /// marker or learned code is written.
    pub fn layout(&self, alphabet_size: usize) -> Result<CodeLayout> {
        self.validate()?;
        if alphabet_size == 0 || alphabet_size > 256 {
            return Err(LzwError::config(format!(
                "alphabet size {alphabet_size} is outside 1-256"
            )));
        }

        let layout = CodeLayout {
            alphabet_size: alphabet_size as u32,
            min_width: self.min_width,
            max_width: self.max_width,
            reset_marker: self.policy == PolicyKind::Reset,
        };
        if alphabet_size > 1 << self.min_width {
            return Err(LzwError::config(format!(
                "minimum width {} cannot hold {} symbols",
                self.min_width, alphabet_size
            )));
        }
        let last_marker = layout.reset_code().unwrap_or(layout.eof_code());
        if last_marker >= layout.capacity() {
            return Err(LzwError::config(format!(
                "maximum width {} leaves no room for the stream markers",
                self.max_width
            )));
        }
        Ok(layout)
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Assignment of the code space: base symbols, markers, learned codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeLayout {
    alphabet_size: u32,
    min_width: u8,
    max_width: u8,
    reset_marker: bool,
}

impl CodeLayout {
    /// Number of base entries (R).
    pub fn alphabet_size(&self) -> u32 {
        self.alphabet_size
    }

    /// Initial codeword width.
    pub fn min_width(&self) -> u8 {
        self.min_width
    }

    /// Final codeword width.
    pub fn max_width(&self) -> u8 {
        self.max_width
    }

    /// End-of-stream marker, right after the base codes.
    pub fn eof_code(&self) -> u32 {
        self.alphabet_size
    }

    /// Reset marker, present only under the reset policy.
    pub fn reset_code(&self) -> Option<u32> {
        self.reset_marker.then_some(self.alphabet_size + 1)
    }

    /// First code available for learned entries.
    pub fn first_code(&self) -> u32 {
        self.alphabet_size + if self.reset_marker { 2 } else { 1 }
    }

    /// Total number of codes, `2^max_width`.
    pub fn capacity(&self) -> u32 {
        1 << self.max_width
    }

    /// True for codes of permanent single-symbol entries.
    pub fn is_base(&self, code: u32) -> bool {
        code < self.alphabet_size
    }
}
