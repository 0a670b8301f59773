//! ANM error types

use crate::compression::CompressionError;
use crate::stream::StreamError;
use thiserror::Error;

/// ANM-specific error type.
///
/// Structural decode failures wrap the underlying error with the entity that
/// was being decoded, so a failure deep in a bone read surfaces as
/// `file … : store … : animation … : frame … : bone … : <cause>`. Low-level
/// stream errors never cross more than one structural boundary raw.
#[derive(Debug, Error)]
pub enum AnmError {
    /// Failure while decoding a named container file.
    #[error("file `{name}`: {source}")]
    File {
        /// Container name supplied by the caller
        name: String,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// Failure while decoding a store.
    #[error("store {index}: {source}")]
    Store {
        /// Position of the store in the container
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// Failure while decoding an animation.
    #[error("animation {index}: {source}")]
    Animation {
        /// Position of the animation in its store
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// Failure while decoding a frame.
    #[error("frame {index}: {source}")]
    Frame {
        /// Position of the frame in its animation
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// Failure while decoding a bone.
    #[error("bone {index}: {source}")]
    Bone {
        /// Position of the bone in its frame
        index: usize,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// Failure while decoding a leaf element (point, matrix, offset).
    #[error("{what}: {source}")]
    Element {
        /// Which element was being decoded
        what: &'static str,
        /// Underlying failure
        #[source]
        source: Box<AnmError>,
    },

    /// A bone flagged as a copy of the previous frame has nothing to copy.
    ///
    /// The source format guarantees the previous frame carries a bone at the
    /// same index; hitting this is a decoder invariant violation.
    #[error("delta bone {bone} has no bone to copy in the previous frame")]
    MissingDeltaSource {
        /// Index of the bone within its frame
        bone: usize,
    },

    /// The container is shorter than its fixed 4-byte header.
    #[error("container too short: {0} bytes, 4-byte header required")]
    MissingHeader(usize),

    /// A string field does not fit the 16-bit length prefix when building.
    #[error("string of {0} bytes exceeds the 16-bit length prefix")]
    StringTooLong(usize),

    /// A frame carries more bones than the signed 16-bit count can hold.
    #[error("frame has {0} bones, exceeding the signed 16-bit count")]
    TooManyBones(usize),

    /// Underlying stream read failure.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Payload inflate/deflate failure.
    #[error(transparent)]
    Compression(#[from] CompressionError),
}

impl AnmError {
    /// Wrap an error with the leaf element being decoded.
    pub(crate) fn element(what: &'static str) -> impl FnOnce(Self) -> Self {
        move |source| Self::Element {
            what,
            source: Box::new(source),
        }
    }
}

/// Result type for ANM operations
pub type AnmResult<T> = Result<T, AnmError>;
