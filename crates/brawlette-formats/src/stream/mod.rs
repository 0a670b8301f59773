//! Positional cursor readers over in-memory byte buffers.
//!
//! [`ByteCursor`] is the primitive every container decoder in this crate is
//! built on: little-endian fixed-width reads, one-byte booleans, and
//! 16-bit-length-prefixed UTF-8 strings, with the offset advancing only on
//! success. [`BitCursor`] is the bit-granular variant kept for the legacy
//! decode path.
//!
//! A read that would pass the end of the buffer fails with
//! [`StreamError::UnexpectedEod`] and consumes nothing; partial values are
//! never produced.

mod bits;
mod error;

pub use bits::BitCursor;
pub use error::{StreamError, StreamResult};

/// Positional reader over an immutable byte buffer.
///
/// The cursor holds the buffer exclusively for its lifetime; the offset
/// never exceeds the buffer length after a successful read.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Read `count` raw bytes, advancing the offset.
    pub fn read_bytes(&mut self, count: usize) -> StreamResult<&'a [u8]> {
        if count > self.remaining() {
            return Err(StreamError::UnexpectedEod {
                offset: self.offset,
                needed: count,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(slice)
    }

    /// Read one byte.
    pub fn read_u8(&mut self) -> StreamResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    /// Read one byte as a boolean (`!= 0`).
    pub fn read_bool(&mut self) -> StreamResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a little-endian `u16`.
    pub fn read_u16(&mut self) -> StreamResult<u16> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `i16`.
    pub fn read_i16(&mut self) -> StreamResult<i16> {
        Ok(i16::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `u32`.
    pub fn read_u32(&mut self) -> StreamResult<u32> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `i32`.
    pub fn read_i32(&mut self) -> StreamResult<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    /// Read a big-endian `u32` (archive header words).
    pub fn read_u32_be(&mut self) -> StreamResult<u32> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    /// Read a little-endian `f32`.
    pub fn read_f32(&mut self) -> StreamResult<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    /// Read a little-endian `f64`.
    pub fn read_f64(&mut self) -> StreamResult<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read a UTF-8 string prefixed by a little-endian `u16` byte length.
    pub fn read_string(&mut self) -> StreamResult<String> {
        let len = usize::from(self.read_u16()?);
        let offset = self.offset;
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| StreamError::InvalidText { offset })
    }

    fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}
