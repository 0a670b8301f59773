//! Keystream and checksum primitives for Brawlhalla's encrypted SWZ archives.
//!
//! This crate provides the stateful primitives the archive decryptor is
//! built on; the container walking itself lives in `brawlette-formats`.
//!
//! # Components
//!
//! - **Generator**: [`WellRng`], the 17-word WELL-style generator whose
//!   stream position drives every mask and checksum in an archive
//! - **Keystream**: [`EntryCipher`] for per-entry XOR masking and rolling
//!   checksums, [`fold_header_hash`] for the archive header check
//! - **Keys**: [`ArchiveKey`], the caller-supplied 32-bit key parameter
//!
//! # Statefulness
//!
//! One generator spans one archive. Every draw mutates state, and entries
//! consume draws in stream order, so out-of-order decoding requires
//! checkpointing (cloning the generator, or replaying a known draw count
//! with [`WellRng::advance`]).
//!
//! # Examples
//!
//! ```
//! use brawlette_crypto::{EntryCipher, WellRng};
//!
//! let mut rng = WellRng::new(0x1234_5678);
//! let mut cipher = EntryCipher::new(&mut rng);
//!
//! let mut data = *b"payload";
//! cipher.encrypt(&mut data);
//! let checksum = cipher.finish();
//!
//! let mut rng = WellRng::new(0x1234_5678);
//! let mut cipher = EntryCipher::new(&mut rng);
//! cipher.decrypt(&mut data);
//! assert_eq!(&data, b"payload");
//! assert_eq!(cipher.finish(), checksum);
//! ```

#![warn(missing_docs)]

pub mod cipher;
pub mod keys;
pub mod well;

pub use cipher::{EntryCipher, HEADER_HASH_SEED, fold_header_hash};
pub use keys::{ArchiveKey, KeyParseError};
pub use well::WellRng;
