//! Bit-granular cursor for the legacy decode path.

use super::error::{StreamError, StreamResult};

/// Positional reader consuming arbitrary bit widths, MSB-first within each
/// byte.
///
/// This is the alternate form of [`ByteCursor`](super::ByteCursor) used by
/// the legacy bit-packed layout. Multi-byte primitives keep that layout's
/// conventions: integers up to 32 bits assemble straight from the bit
/// stream (so 16- and 32-bit reads see bytes in stream order), while the
/// 64-bit path assembles its eight bytes little-endian.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    data: &'a [u8],
    bit_offset: usize,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the first bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            bit_offset: 0,
        }
    }

    /// Current position in bits from the start of the buffer.
    pub fn bit_position(&self) -> usize {
        self.bit_offset
    }

    /// Bits left to read.
    pub fn remaining_bits(&self) -> usize {
        self.data.len() * 8 - self.bit_offset
    }

    /// Read `count` bits (0..=32), assembled MSB-first.
    ///
    /// Fails with [`StreamError::UnexpectedEodBits`] when fewer than `count`
    /// bits remain, consuming nothing.
    pub fn read_bits(&mut self, count: u32) -> StreamResult<u32> {
        if count > 32 {
            return Err(StreamError::InvalidBitWidth(count));
        }
        if count as usize > self.remaining_bits() {
            return Err(StreamError::UnexpectedEodBits {
                bit_offset: self.bit_offset,
                needed: count as usize,
                remaining: self.remaining_bits(),
            });
        }

        let mut result = 0u32;
        for _ in 0..count {
            let byte = self.data[self.bit_offset / 8];
            let bit = (byte >> (7 - self.bit_offset % 8)) & 1;
            result = (result << 1) | u32::from(bit);
            self.bit_offset += 1;
        }
        Ok(result)
    }

    /// Read a single bit as a boolean.
    pub fn read_bool(&mut self) -> StreamResult<bool> {
        Ok(self.read_bits(1)? != 0)
    }

    /// Read eight bits.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        Ok(self.read_bits(8)? as u8)
    }

    /// Read sixteen bits in stream order.
    pub fn read_u16(&mut self) -> StreamResult<u16> {
        Ok(self.read_bits(16)? as u16)
    }

    /// Read sixteen bits in stream order, sign-extended.
    pub fn read_i16(&mut self) -> StreamResult<i16> {
        Ok(self.read_bits(16)? as u16 as i16)
    }

    /// Read thirty-two bits in stream order.
    pub fn read_u32(&mut self) -> StreamResult<u32> {
        self.read_bits(32)
    }

    /// Read an `f32` from the next thirty-two bits.
    pub fn read_f32(&mut self) -> StreamResult<f32> {
        Ok(f32::from_bits(self.read_bits(32)?))
    }

    /// Read an `f64` from the next eight bytes, assembled little-endian.
    pub fn read_f64(&mut self) -> StreamResult<f64> {
        let mut bytes = [0u8; 8];
        for byte in &mut bytes {
            *byte = self.read_u8()?;
        }
        Ok(f64::from_bits(u64::from_le_bytes(bytes)))
    }

    /// Read a UTF-8 string prefixed by a 16-bit byte length.
    pub fn read_string(&mut self) -> StreamResult<String> {
        let len = usize::from(self.read_u16()?);
        let offset = self.bit_offset / 8;
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            bytes.push(self.read_u8()?);
        }
        String::from_utf8(bytes).map_err(|_| StreamError::InvalidText { offset })
    }
}
