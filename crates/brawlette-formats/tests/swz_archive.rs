//! End-to-end SWZ archive tests: builder/reader round-trips, recovery after
//! a bad entry, and checkpoint replay of the keystream.

use brawlette_crypto::{ArchiveKey, EntryCipher, WellRng};
use brawlette_formats::compression::{deflate, inflate};
use brawlette_formats::stream::ByteCursor;
use brawlette_formats::swz::{SwzBuilder, SwzError, SwzReader, decrypt_archive, decrypt_archive_lossy};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

const KEY: ArchiveKey = ArchiveKey::new(837_857_090);
const SEED: u32 = 0x5EED_CAFE;

const ENTRIES: [&str; 3] = [
    "<LanguageTypes><Language id=\"1\"/></LanguageTypes>",
    "HurtboxType,Width,Height\nStandard,80,200\n",
    "<PowerTypes>\n  <Power name=\"Neutral\"/>\n</PowerTypes>",
];

fn sample_archive() -> Vec<u8> {
    ENTRIES
        .iter()
        .fold(SwzBuilder::new(KEY, SEED), |builder, text| {
            builder.entry(*text)
        })
        .build()
        .expect("build should succeed")
}

/// Byte offset of entry `index`'s encrypted payload within the archive.
fn payload_offset(index: usize) -> usize {
    let mut offset = 8;
    for text in &ENTRIES[..index] {
        offset += 12 + deflate(text.as_bytes()).expect("deflate").len();
    }
    offset + 12
}

#[test]
fn round_trip_decodes_every_entry_in_order() {
    let entries = decrypt_archive(&sample_archive(), KEY).expect("decrypt should succeed");
    assert_eq!(entries, ENTRIES);
}

#[test]
fn corrupt_entry_is_reported_and_iteration_continues() {
    let mut data = sample_archive();
    data[payload_offset(1)] ^= 0x40;

    let mut reader = SwzReader::new(&data, KEY).expect("header should verify");

    let first = reader.next().expect("entry 0").expect("entry 0 decodes");
    assert_eq!(first, ENTRIES[0]);

    let err = reader
        .next()
        .expect("entry 1")
        .expect_err("corrupted entry must fail");
    assert!(matches!(err, SwzError::EntryChecksum { index: 1, .. }));
    assert!(err.is_recoverable());

    // The generator is still synchronized: entry 2 decodes cleanly.
    let third = reader.next().expect("entry 2").expect("entry 2 decodes");
    assert_eq!(third, ENTRIES[2]);
    assert!(reader.next().is_none());
}

#[test]
fn lossy_decode_skips_only_the_bad_entry() {
    let mut data = sample_archive();
    data[payload_offset(1)] ^= 0x40;

    let entries = decrypt_archive_lossy(&data, KEY).expect("lossy decrypt should succeed");
    assert_eq!(entries, vec![ENTRIES[0].to_string(), ENTRIES[2].to_string()]);

    let strict = decrypt_archive(&data, KEY);
    assert!(matches!(strict, Err(SwzError::EntryChecksum { index: 1, .. })));
}

#[test]
fn checkpoint_replay_reproduces_a_late_entry() {
    let data = sample_archive();

    // Sequential decode, for reference.
    let sequential = decrypt_archive(&data, KEY).expect("decrypt should succeed");

    // Replay: a fresh generator advanced past the header rounds and the
    // draws of entries 0 and 1 (two size draws, one checksum seed, one per
    // deflated byte) must decode entry 2 bit-identically.
    let mut draws = u64::from(KEY.hash_rounds());
    for text in &ENTRIES[..2] {
        draws += 3 + deflate(text.as_bytes()).expect("deflate").len() as u64;
    }
    let mut rng = WellRng::new(SEED ^ KEY.value());
    rng.advance(draws);

    let mut cursor = ByteCursor::new(&data[payload_offset(2) - 12..]);
    let deflated_size = cursor.read_u32_be().expect("size word") ^ rng.next_u32();
    let _inflated_size = cursor.read_u32_be().expect("size word") ^ rng.next_u32();
    let expected = cursor.read_u32_be().expect("checksum word");

    let mut buffer = cursor
        .read_bytes(deflated_size as usize)
        .expect("payload bytes")
        .to_vec();
    let mut cipher = EntryCipher::new(&mut rng);
    cipher.decrypt(&mut buffer);
    assert_eq!(cipher.finish(), expected);

    let text = String::from_utf8(inflate(&buffer).expect("inflate")).expect("utf8");
    assert_eq!(text, sequential[2]);
    assert_eq!(text, ENTRIES[2]);
}

#[test]
fn trailing_garbage_fails_as_a_truncated_entry() {
    let mut data = sample_archive();
    data.extend_from_slice(&[0xAB; 5]);

    let mut reader = SwzReader::new(&data, KEY).expect("header should verify");
    let mut results = Vec::new();
    for item in reader.by_ref() {
        results.push(item);
    }

    assert_eq!(results.len(), 4);
    assert!(results[..3].iter().all(Result::is_ok));
    // Five stray bytes cannot hold an entry header; whatever sizes they
    // decode to, the read fails before any per-byte keystream draw.
    assert!(matches!(
        results[3],
        Err(SwzError::EntryTruncated { index: 3, .. } | SwzError::TruncatedEntry { index: 3, .. })
    ));
}

proptest! {
    /// Any set of text payloads survives a build/decrypt round trip under
    /// any seed and key.
    #[test]
    fn archive_round_trip_always_works(
        entries in prop::collection::vec(".{0,64}", 0..4),
        seed in any::<u32>(),
        key in any::<u32>(),
    ) {
        let key = ArchiveKey::new(key);
        let builder = entries
            .iter()
            .fold(SwzBuilder::new(key, seed), |builder, text| {
                builder.entry(text.clone())
            });
        let data = builder.build().map_err(|e| TestCaseError::fail(e.to_string()))?;

        let decoded = decrypt_archive(&data, key)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, entries);
    }
}
