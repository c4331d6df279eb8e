//! MSB-first bit channel.
//!
//! Codewords change width as the codebook grows, so both halves take the
//! width on every call instead of fixing it at construction.

use crate::error::{LzwError, Result};

/// Widest value a single call can carry.
pub const MAX_BITS_PER_CALL: u8 = 32;

#[inline]
fn check_width(count: u8) -> Result<()> {
    if count == 0 || count > MAX_BITS_PER_CALL {
        return Err(LzwError::InvalidBitWidth(count));
    }
    Ok(())
}

/// MSB-first bit reader over a byte slice.
#[derive(Debug)]
pub struct MsbBitReader<'a> {
    /// Input data.
    data: &'a [u8],
    /// Current byte position.
    byte_pos: usize,
    /// Bit buffer; the valid bits are the low `bits_in_buffer` bits.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits read (for error reporting).
    total_bits_read: u64,
}

impl<'a> MsbBitReader<'a> {
    /// Create a new MSB bit reader.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
        }
    }

    /// Fill buffer with at least `count` bits.
    #[inline]
    fn fill_buffer(&mut self, count: u8) -> Result<()> {
        while self.bits_in_buffer < count && self.byte_pos < self.data.len() {
            let byte = self.data[self.byte_pos];
            self.byte_pos += 1;

            self.buffer = (self.buffer << 8) | u64::from(byte);
            self.bits_in_buffer += 8;
        }

        if self.bits_in_buffer < count {
            return Err(LzwError::UnexpectedEof {
                position: self.total_bits_read,
            });
        }

        Ok(())
    }

    /// Read exactly `count` bits (1-32).
    pub fn read_bits(&mut self, count: u8) -> Result<u32> {
        check_width(count)?;
        self.fill_buffer(count)?;

        let shift = self.bits_in_buffer - count;
        let mask = (1u64 << count) - 1;
        let value = (self.buffer >> shift) & mask;

        self.bits_in_buffer -= count;
        self.total_bits_read += u64::from(count);

        Ok(value as u32)
    }

    /// Read a whole byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Get total bits read.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Bits still available, buffered or not.
    pub fn remaining_bits(&self) -> u64 {
        u64::from(self.bits_in_buffer) + (self.data.len() - self.byte_pos) as u64 * 8
    }
}

/// MSB-first bit writer.
#[derive(Debug, Default)]
pub struct MsbBitWriter {
    /// Output buffer.
    output: Vec<u8>,
    /// Bit buffer; fewer than 8 bits are pending between calls.
    buffer: u64,
    /// Number of bits in buffer.
    bits_in_buffer: u8,
    /// Total bits written, excluding padding.
    total_bits_written: u64,
}

impl MsbBitWriter {
    /// Create a new MSB bit writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` using exactly `count` bits (1-32).
    pub fn write_bits(&mut self, value: u32, count: u8) -> Result<()> {
        check_width(count)?;
        if count < 32 && value >> count != 0 {
            return Err(LzwError::CodeOverflow {
                code: value,
                width: count,
            });
        }

        self.buffer = (self.buffer << count) | u64::from(value);
        self.bits_in_buffer += count;
        self.total_bits_written += u64::from(count);

        while self.bits_in_buffer >= 8 {
            let byte = (self.buffer >> (self.bits_in_buffer - 8)) as u8;
            self.output.push(byte);
            self.bits_in_buffer -= 8;
        }

        Ok(())
    }

    /// Append a whole byte.
    pub fn write_u8(&mut self, byte: u8) -> Result<()> {
        self.write_bits(u32::from(byte), 8)
    }

    /// Total bits written so far, excluding padding.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Pad the final partial byte with zero bits and return the output.
    pub fn finish(mut self) -> Vec<u8> {
        if self.bits_in_buffer > 0 {
            let remaining = 8 - self.bits_in_buffer;
            let byte = ((self.buffer << remaining) & 0xFF) as u8;
            self.output.push(byte);
        }
        self.output
    }
}
