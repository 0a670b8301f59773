//! Stream reader error types

use thiserror::Error;

/// Errors raised by the positional cursor readers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A read would pass the end of the buffer. The cursor does not advance.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {remaining} remain")]
    UnexpectedEod {
        /// Byte offset the read started from
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// A bit-granular read would pass the end of the buffer.
    #[error("unexpected end of data at bit {bit_offset}: needed {needed} bits, {remaining} remain")]
    UnexpectedEodBits {
        /// Bit offset the read started from
        bit_offset: usize,
        /// Bits the read required
        needed: usize,
        /// Bits left in the buffer
        remaining: usize,
    },

    /// A length-prefixed string holds invalid UTF-8.
    #[error("invalid UTF-8 in length-prefixed string at offset {offset}")]
    InvalidText {
        /// Byte offset of the string payload
        offset: usize,
    },

    /// `read_bits` was asked for more than 32 bits.
    #[error("invalid bit width {0}: at most 32 bits per read")]
    InvalidBitWidth(u32),
}

/// Result type for stream reader operations
pub type StreamResult<T> = Result<T, StreamError>;
