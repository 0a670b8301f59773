//! SWZ archive builder.

use super::error::{SwzError, SwzResult};
use crate::compression::deflate;
use brawlette_crypto::{ArchiveKey, EntryCipher, WellRng, fold_header_hash};

/// Builder producing an encrypted archive from text payloads.
///
/// The builder runs the same keystream as the reader, in the same draw
/// order, so its output decrypts byte-identically: header hash first, then
/// per entry the two size draws, the checksum seed, and one draw per
/// deflated byte.
#[derive(Debug, Clone)]
pub struct SwzBuilder {
    key: ArchiveKey,
    seed: u32,
    entries: Vec<String>,
}

impl SwzBuilder {
    /// Start an archive for `key`, using `seed` as the stored stream seed.
    pub fn new(key: ArchiveKey, seed: u32) -> Self {
        Self {
            key,
            seed,
            entries: Vec::new(),
        }
    }

    /// Append one text payload.
    pub fn entry(mut self, text: impl Into<String>) -> Self {
        self.entries.push(text.into());
        self
    }

    /// Serialize the archive.
    pub fn build(&self) -> SwzResult<Vec<u8>> {
        let mut rng = WellRng::new(self.seed ^ self.key.value());

        let mut out = Vec::new();
        let hash = fold_header_hash(&mut rng, self.key.hash_rounds());
        out.extend_from_slice(&hash.to_be_bytes());
        out.extend_from_slice(&self.seed.to_be_bytes());

        for text in &self.entries {
            let payload = text.as_bytes();
            let mut deflated = deflate(payload).map_err(SwzError::BuildDeflate)?;

            let deflated_size = u32::try_from(deflated.len())
                .map_err(|_| SwzError::EntryTooLarge { len: deflated.len() })?;
            let inflated_size = u32::try_from(payload.len())
                .map_err(|_| SwzError::EntryTooLarge { len: payload.len() })?;

            // Same draw order as the reader: deflated size, inflated size,
            // then the entry keystream.
            let masked_deflated = deflated_size ^ rng.next_u32();
            let masked_inflated = inflated_size ^ rng.next_u32();

            let mut cipher = EntryCipher::new(&mut rng);
            cipher.encrypt(&mut deflated);
            let checksum = cipher.finish();

            out.extend_from_slice(&masked_deflated.to_be_bytes());
            out.extend_from_slice(&masked_inflated.to_be_bytes());
            out.extend_from_slice(&checksum.to_be_bytes());
            out.extend_from_slice(&deflated);
        }

        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let key = ArchiveKey::new(42);
        let seed = 0x0102_0304;
        let data = SwzBuilder::new(key, seed).build().expect("build");

        assert_eq!(data.len(), 8);
        assert_eq!(&data[4..8], &seed.to_be_bytes());

        let mut rng = WellRng::new(seed ^ key.value());
        let hash = fold_header_hash(&mut rng, key.hash_rounds());
        assert_eq!(&data[..4], &hash.to_be_bytes());
    }

    #[test]
    fn test_entry_sizes_are_masked() {
        let key = ArchiveKey::new(42);
        let data = SwzBuilder::new(key, 9)
            .entry("abc")
            .build()
            .expect("build");

        // Unmask the deflated size with the first post-header draw and
        // check it against the actual payload length.
        let mut rng = WellRng::new(9 ^ key.value());
        fold_header_hash(&mut rng, key.hash_rounds());
        let masked = u32::from_be_bytes(data[8..12].try_into().expect("slice"));
        let deflated_size = masked ^ rng.next_u32();
        assert_eq!(deflated_size as usize, data.len() - 20);
    }
}
