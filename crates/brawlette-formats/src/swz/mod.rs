//! SWZ encrypted archive format.
//!
//! An archive is `[u32 BE expected_hash][u32 BE seed]` followed by entries
//! of `[u32 BE deflated_size ^ draw][u32 BE inflated_size ^ draw]
//! [u32 BE checksum][deflated_size encrypted bytes]` until end of stream.
//! One keystream generator, constructed from `seed ^ key`, spans the whole
//! file: the two size words, the checksum seed, and every payload byte each
//! consume one draw, in stream order. Entries therefore decode strictly
//! sequentially; there is no random access.
//!
//! # Examples
//!
//! ```no_run
//! use brawlette_crypto::ArchiveKey;
//! use brawlette_formats::swz::SwzReader;
//!
//! let bytes = std::fs::read("Engine.swz")?;
//! let key = ArchiveKey::new(837_857_090);
//! for entry in SwzReader::new(&bytes, key)? {
//!     println!("{} bytes of text", entry?.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod error;

pub use builder::SwzBuilder;
pub use error::{SwzError, SwzResult};

use crate::compression::inflate;
use crate::stream::ByteCursor;
use brawlette_crypto::{ArchiveKey, EntryCipher, WellRng, fold_header_hash};
use tracing::{debug, warn};

/// Sequential reader over an encrypted archive.
///
/// Construction verifies the header hash; iteration then yields one decoded
/// UTF-8 payload per entry, in stream order. After a recoverable
/// [`SwzError::EntryChecksum`] the iterator keeps going (the generator is
/// already synchronized); any other error fuses it.
pub struct SwzReader<'a> {
    cursor: ByteCursor<'a>,
    rng: WellRng,
    index: usize,
    done: bool,
}

impl<'a> SwzReader<'a> {
    /// Open an archive, verifying its header against `key`.
    ///
    /// Fails with [`SwzError::HeaderMismatch`] before any entry is touched:
    /// a wrong key desynchronizes the whole keystream, so continuing would
    /// only produce garbage.
    pub fn new(data: &'a [u8], key: ArchiveKey) -> SwzResult<Self> {
        let mut cursor = ByteCursor::new(data);
        let expected = cursor
            .read_u32_be()
            .map_err(|source| SwzError::HeaderTruncated { source })?;
        let seed = cursor
            .read_u32_be()
            .map_err(|source| SwzError::HeaderTruncated { source })?;

        let mut rng = WellRng::new(seed ^ key.value());
        let computed = fold_header_hash(&mut rng, key.hash_rounds());
        if computed != expected {
            return Err(SwzError::HeaderMismatch { expected, computed });
        }
        debug!(seed, rounds = key.hash_rounds(), "archive header verified");

        Ok(Self {
            cursor,
            rng,
            index: 0,
            done: false,
        })
    }

    /// Entries decoded (or attempted) so far.
    pub fn entries_read(&self) -> usize {
        self.index
    }

    fn next_entry(&mut self) -> SwzResult<String> {
        let index = self.index;
        let wrap = |source| SwzError::EntryTruncated { index, source };

        let deflated_size = self.cursor.read_u32_be().map_err(wrap)? ^ self.rng.next_u32();
        let inflated_size = self.cursor.read_u32_be().map_err(wrap)? ^ self.rng.next_u32();
        let expected = self.cursor.read_u32_be().map_err(wrap)?;

        // Check before the byte loop so a lying size field never draws the
        // per-byte keystream.
        if deflated_size as usize > self.cursor.remaining() {
            return Err(SwzError::TruncatedEntry {
                index,
                declared: deflated_size,
                remaining: self.cursor.remaining(),
            });
        }
        let mut buffer = self.cursor.read_bytes(deflated_size as usize).map_err(wrap)?.to_vec();

        let mut cipher = EntryCipher::new(&mut self.rng);
        cipher.decrypt(&mut buffer);
        let computed = cipher.finish();
        if computed != expected {
            return Err(SwzError::EntryChecksum {
                index,
                expected,
                computed,
            });
        }

        let inflated = inflate(&buffer).map_err(|source| SwzError::EntryInflate { index, source })?;
        if inflated.len() != inflated_size as usize {
            debug!(
                index,
                declared = inflated_size,
                actual = inflated.len(),
                "inflated size field disagrees with payload"
            );
        }
        String::from_utf8(inflated).map_err(|source| SwzError::EntryText { index, source })
    }
}

impl Iterator for SwzReader<'_> {
    type Item = SwzResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.cursor.remaining() == 0 {
            return None;
        }
        let result = self.next_entry();
        self.index += 1;
        if let Err(e) = &result {
            if !e.is_recoverable() {
                self.done = true;
            }
        }
        Some(result)
    }
}

/// Decrypt every entry of an archive, failing on the first error.
pub fn decrypt_archive(data: &[u8], key: ArchiveKey) -> SwzResult<Vec<String>> {
    SwzReader::new(data, key)?.collect()
}

/// Decrypt an archive, skipping entries whose checksum fails.
///
/// Skipped entries are logged; any non-recoverable error still aborts.
pub fn decrypt_archive_lossy(data: &[u8], key: ArchiveKey) -> SwzResult<Vec<String>> {
    let mut entries = Vec::new();
    for result in SwzReader::new(data, key)? {
        match result {
            Ok(text) => entries.push(text),
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "skipping archive entry with bad checksum");
            }
            Err(e) => return Err(e),
        }
    }
    Ok(entries)
}
