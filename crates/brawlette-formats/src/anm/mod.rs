//! ANM animation container format.
//!
//! An ANM file is a 4-byte opaque header followed by a zlib-compressed
//! payload holding stores of animations. Frames delta-compress their bones
//! against the previous frame, so decoding is strictly sequential within an
//! animation.
//!
//! # Features
//!
//! - Parser and builder for the container and every nested record
//! - Delta-bone resolution (copy-with-override against the previous frame)
//! - Flag-compressed transform matrices and points
//!
//! # Examples
//!
//! ```no_run
//! use brawlette_formats::anm::AnmFile;
//!
//! let bytes = std::fs::read("Animation_Hero.anm")?;
//! let file = AnmFile::parse("Animation_Hero", &bytes)?;
//! for store in &file.stores {
//!     println!("{}: {} animations", store.name, store.animations.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod animation;
mod bone;
mod error;
mod frame;
mod store;

pub use animation::AnmAnimation;
pub use bone::{AffineMatrix, AnmBone, TransformMatrix, Vec2};
pub use error::{AnmError, AnmResult};
pub use frame::{AnmFrame, Point};
pub use store::AnmStore;

use crate::compression::{deflate, inflate};
use crate::stream::ByteCursor;
use tracing::debug;

/// Length of the opaque container header.
pub const HEADER_LEN: usize = 4;

/// A decoded animation container.
#[derive(Debug, Clone, PartialEq)]
pub struct AnmFile {
    /// Container name, supplied by the caller (usually the file stem)
    pub name: String,
    /// The opaque 4-byte header
    pub header: [u8; 4],
    /// Stores in declared order
    pub stores: Vec<AnmStore>,
}

impl AnmFile {
    /// Decode a container from its raw bytes.
    ///
    /// `name` labels the container in errors and logs; it is not part of
    /// the wire format.
    pub fn parse(name: &str, data: &[u8]) -> AnmResult<Self> {
        Self::parse_inner(name, data).map_err(|e| AnmError::File {
            name: name.to_string(),
            source: Box::new(e),
        })
    }

    fn parse_inner(name: &str, data: &[u8]) -> AnmResult<Self> {
        if data.len() < HEADER_LEN {
            return Err(AnmError::MissingHeader(data.len()));
        }
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&data[..HEADER_LEN]);

        let payload = inflate(&data[HEADER_LEN..])?;
        let mut cur = ByteCursor::new(&payload);

        let mut stores = Vec::new();
        while cur.read_bool()? {
            let store = AnmStore::parse(&mut cur).map_err(|e| AnmError::Store {
                index: stores.len(),
                source: Box::new(e),
            })?;
            stores.push(store);
        }
        debug!(file = name, stores = stores.len(), "decoded animation container");

        Ok(Self {
            name: name.to_string(),
            header,
            stores,
        })
    }

    /// Re-serialize the container: header plus deflated payload.
    ///
    /// Bones are written fully specified; the result decodes to an equal
    /// tree but is not necessarily byte-identical to the source container.
    pub fn build(&self) -> AnmResult<Vec<u8>> {
        let mut payload = Vec::new();
        for store in &self.stores {
            payload.push(1);
            store.write(&mut payload)?;
        }
        payload.push(0);

        let mut out = Vec::with_capacity(HEADER_LEN + payload.len() / 2);
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&deflate(&payload)?);
        Ok(out)
    }

    /// Find a store whose name contains `name`.
    pub fn store_by_name(&self, name: &str) -> Option<&AnmStore> {
        self.stores.iter().find(|s| s.name.contains(name))
    }
}

// Strings are written as a 16-bit byte length followed by UTF-8 bytes.
pub(crate) fn put_string(out: &mut Vec<u8>, value: &str) -> AnmResult<()> {
    let len = u16::try_from(value.len()).map_err(|_| AnmError::StringTooLong(value.len()))?;
    out.extend_from_slice(&len.to_le_bytes());
    out.extend_from_slice(value.as_bytes());
    Ok(())
}
