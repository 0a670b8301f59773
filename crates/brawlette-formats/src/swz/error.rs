//! SWZ error types

use crate::compression::CompressionError;
use crate::stream::StreamError;
use thiserror::Error;

/// SWZ-specific error type.
///
/// Only [`EntryChecksum`](Self::EntryChecksum) is recoverable: the keystream
/// generator has already advanced past the bad entry, so iteration may
/// continue with the next one. Every other failure desynchronizes or ends
/// the stream and is terminal for the archive.
#[derive(Debug, Error)]
pub enum SwzError {
    /// The computed header hash disagrees with the stored one.
    ///
    /// Fatal: the generator stream itself is wrong (bad key or corrupt
    /// header), so no entry is ever attempted.
    #[error("header checksum mismatch: computed {computed:#010X}, expected {expected:#010X}")]
    HeaderMismatch {
        /// Hash stored in the archive
        expected: u32,
        /// Hash computed from the seed and key
        computed: u32,
    },

    /// The stream ended inside the two header words.
    #[error("archive header truncated: {source}")]
    HeaderTruncated {
        /// Underlying stream failure
        #[source]
        source: StreamError,
    },

    /// An entry's rolled checksum disagrees with the stored one.
    ///
    /// The payload is discarded but the generator is already synchronized
    /// past the entry; decoding may continue.
    #[error("entry {index}: checksum mismatch: computed {computed:#010X}, expected {expected:#010X}")]
    EntryChecksum {
        /// Position of the entry in the archive
        index: usize,
        /// Checksum stored in the archive
        expected: u32,
        /// Checksum rolled over the decrypted bytes
        computed: u32,
    },

    /// An entry declares more payload bytes than the stream holds.
    #[error("entry {index}: declared {declared} deflated bytes with only {remaining} remaining")]
    TruncatedEntry {
        /// Position of the entry in the archive
        index: usize,
        /// Deflated size the entry header declares
        declared: u32,
        /// Bytes actually left in the stream
        remaining: usize,
    },

    /// The stream ended inside an entry's three header words.
    #[error("entry {index}: header truncated: {source}")]
    EntryTruncated {
        /// Position of the entry in the archive
        index: usize,
        /// Underlying stream failure
        #[source]
        source: StreamError,
    },

    /// An entry's decrypted payload is not a zlib stream.
    #[error("entry {index}: {source}")]
    EntryInflate {
        /// Position of the entry in the archive
        index: usize,
        /// Underlying compression failure
        #[source]
        source: CompressionError,
    },

    /// An entry's inflated payload is not UTF-8 text.
    #[error("entry {index}: payload is not valid UTF-8")]
    EntryText {
        /// Position of the entry in the archive
        index: usize,
        /// Underlying conversion failure
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// Deflating a payload failed while building an archive.
    #[error("building archive: {0}")]
    BuildDeflate(#[source] CompressionError),

    /// A payload does not fit the 32-bit entry size fields when building.
    #[error("entry payload of {len} bytes exceeds the 32-bit size field")]
    EntryTooLarge {
        /// Payload size in bytes
        len: usize,
    },
}

impl SwzError {
    /// Whether decoding may continue with the next entry after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EntryChecksum { .. })
    }
}

/// Result type for SWZ operations
pub type SwzResult<T> = Result<T, SwzError>;
