//! Archive decryption keys.
//!
//! Each archive is parameterized by a 32-bit key distributed with the game
//! build. The key seeds the keystream generator (XORed against the archive's
//! stored seed) and fixes the number of header hash rounds. Keys circulate
//! as decimal or `0x`-prefixed hex strings in community tooling, so both
//! forms parse.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing an archive key from a string.
#[derive(Debug, Error)]
pub enum KeyParseError {
    /// The string is not a decimal or `0x`-prefixed hex 32-bit value.
    #[error("invalid archive key `{0}`: expected a decimal or 0x-prefixed hex u32")]
    Invalid(String),
}

/// Caller-supplied 32-bit decryption key for one archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchiveKey(u32);

impl ArchiveKey {
    /// Wrap a raw key value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw 32-bit key value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Number of header hash rounds this key selects: `(key mod 31) + 5`.
    pub const fn hash_rounds(self) -> u32 {
        self.0 % 31 + 5
    }
}

impl From<u32> for ArchiveKey {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for ArchiveKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parsed = if let Some(hex) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            u32::from_str_radix(hex, 16)
        } else {
            trimmed.parse::<u32>()
        };
        parsed
            .map(Self)
            .map_err(|_| KeyParseError::Invalid(s.to_string()))
    }
}

impl fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let key: ArchiveKey = "837857090".parse().expect("decimal key should parse");
        assert_eq!(key.value(), 837_857_090);
    }

    #[test]
    fn test_parse_hex() {
        let key: ArchiveKey = "0xDEADBEEF".parse().expect("hex key should parse");
        assert_eq!(key.value(), 0xDEAD_BEEF);

        let key: ArchiveKey = " 0X10 ".parse().expect("hex key should parse");
        assert_eq!(key.value(), 16);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<ArchiveKey>().is_err());
        assert!("key".parse::<ArchiveKey>().is_err());
        assert!("0x".parse::<ArchiveKey>().is_err());
        assert!("-1".parse::<ArchiveKey>().is_err());
        assert!("4294967296".parse::<ArchiveKey>().is_err());
    }

    #[test]
    fn test_hash_rounds_range() {
        // (key mod 31) + 5 always lands in 5..=35.
        for key in [0u32, 1, 30, 31, 62, u32::MAX] {
            let rounds = ArchiveKey::new(key).hash_rounds();
            assert!((5..=35).contains(&rounds), "rounds {rounds} for key {key}");
        }
        assert_eq!(ArchiveKey::new(0).hash_rounds(), 5);
        assert_eq!(ArchiveKey::new(30).hash_rounds(), 35);
        assert_eq!(ArchiveKey::new(31).hash_rounds(), 5);
    }
}
