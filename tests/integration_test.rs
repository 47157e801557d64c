use rdos::entry::{BLOCK_SIZE, DELETED_FILENAME, RECORD_SIZE};
use rdos::{
    classify, decode, read_content, ContentKind, FilterHint, ImageStore, RawRecord, RdosError,
    RecordSlot, StoreOptions,
};
use proptest::prelude::*;
use std::fs::File;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_record(name: &str, marker: u8, blocks: u8, address: u16, length: u16, start: u16) -> [u8; RECORD_SIZE] {
    let mut r = [b' '; RECORD_SIZE];
    r[..name.len()].copy_from_slice(name.as_bytes());
    r[0x18] = marker;
    r[0x19] = blocks;
    r[0x1A..0x1C].copy_from_slice(&address.to_le_bytes());
    r[0x1C..0x1E].copy_from_slice(&length.to_le_bytes());
    r[0x1E..0x20].copy_from_slice(&start.to_le_bytes());
    r
}

/// Linear image whose block `n` holds the bytes `n, n+1, n+2, ...` (mod 256).
fn ramp_image(blocks: usize) -> Vec<u8> {
    (0..blocks)
        .flat_map(|b| (0..BLOCK_SIZE).map(move |i| (b + i) as u8))
        .collect()
}

#[test]
fn test_hello_scenario() {
    init_logging();
    let raw = [
        b'H', b'E', b'L', b'L', b'O', b' ', b' ', b' ', b' ', b' ', b' ', b' ',
        b' ', b' ', b' ', b' ', b' ', b' ', b' ', b' ', b' ', b' ', b' ', b' ',
        0x41, 0x02, 0x03, 0x08, 0x90, 0x01, 0x05, 0x00,
    ];
    let entry = decode(RawRecord::new(&raw).unwrap());
    assert_eq!(entry.filename, "HELLO                   ");
    assert_eq!(classify(&entry).0, ContentKind::AppleSoftProgram);
    assert_eq!(entry.byte_length, 400);
    assert_eq!(entry.starting_block, 5);
    assert_eq!(entry.load_address, 0x0803);

    let image = ramp_image(8);
    let mut store = ImageStore::new(Cursor::new(image.clone()));
    let data = read_content(&entry, &mut store).unwrap();
    assert_eq!(data, &image[5 * BLOCK_SIZE..5 * BLOCK_SIZE + 400]);
}

#[test]
fn test_read_from_image_file() {
    init_logging();
    let image = ramp_image(16);
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(&image).unwrap();
    temp.flush().unwrap();

    let entry = decode(RawRecord::from(&make_record("GAME", b'B', 2, 0x4000, 300, 10)));
    let mut store = ImageStore::new(File::open(temp.path()).unwrap());
    let data = read_content(&entry, &mut store).unwrap();
    assert_eq!(data.len(), 300);
    assert_eq!(data, &image[10 * BLOCK_SIZE..10 * BLOCK_SIZE + 300]);
}

#[test]
fn test_walk_directory_until_terminator() {
    init_logging();
    let mut catalog = Vec::new();
    catalog.extend_from_slice(&make_record("HELLO", b'A', 1, 0x0801, 200, 0));
    let mut deleted = make_record("OLD", b'T', 1, 0, 10, 1);
    deleted[0] = 0x80;
    catalog.extend_from_slice(&deleted);
    catalog.extend_from_slice(&make_record("PICTURE", b'B', 33, 0x2000, 8192, 2));
    catalog.extend_from_slice(&[0u8; RECORD_SIZE]);
    catalog.extend_from_slice(&make_record("GHOST", b'T', 1, 0, 10, 1));

    let mut seen = Vec::new();
    for chunk in catalog.chunks_exact(RECORD_SIZE) {
        let raw = RawRecord::new(chunk).unwrap();
        if raw.slot() == RecordSlot::EndOfDirectory {
            break;
        }
        let entry = decode(raw);
        seen.push((entry.filename.trim_end().to_string(), classify(&entry)));
    }

    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], ("HELLO".to_string(), (ContentKind::AppleSoftProgram, FilterHint::ApplesoftListing)));
    assert_eq!(seen[1].0, DELETED_FILENAME.trim_end());
    assert_eq!(seen[1].1.0, ContentKind::Unclassified);
    assert_eq!(seen[2].1, (ContentKind::BinaryOrGraphics, FilterHint::HiResColor));
}

#[test]
fn test_13_sector_image() {
    init_logging();
    // 3 tracks of 16 sectors; sector payload = image sector index.
    let image: Vec<u8> = (0..48u8).flat_map(|s| std::iter::repeat(s).take(BLOCK_SIZE)).collect();
    let mut store = ImageStore::with_options(Cursor::new(image), StoreOptions::rdos_13_sector()).unwrap();

    // Blocks 12, 13 straddle the track boundary: image sectors 12 and 16.
    let entry = decode(RawRecord::from(&make_record("SPAN", b'T', 2, 0, 512, 12)));
    let data = read_content(&entry, &mut store).unwrap();
    assert!(data[..BLOCK_SIZE].iter().all(|&b| b == 12));
    assert!(data[BLOCK_SIZE..].iter().all(|&b| b == 16));
}

#[test]
fn test_block_past_end_of_image() {
    init_logging();
    let mut store = ImageStore::new(Cursor::new(ramp_image(4)));
    let entry = decode(RawRecord::from(&make_record("LOST", b'B', 2, 0, 400, 3)));
    match read_content(&entry, &mut store) {
        Err(RdosError::TruncatedRead { needed, got }) => {
            assert_eq!(needed, 512);
            assert_eq!(got, 256);
        }
        other => panic!("expected TruncatedRead, got {other:?}"),
    }
}

#[test]
fn test_malformed_record() {
    assert!(matches!(
        RawRecord::new(&[0x41u8; 31]),
        Err(RdosError::MalformedRecord { len: 31 })
    ));
}

proptest! {
    #[test]
    fn decode_is_deterministic(bytes in prop::array::uniform32(any::<u8>())) {
        let a = decode(RawRecord::from(&bytes));
        let b = decode(RawRecord::from(&bytes));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn deleted_ignores_remaining_bytes(bytes in prop::array::uniform32(any::<u8>())) {
        let mut bytes = bytes;
        bytes[0] = 0x80;
        let entry = decode(RawRecord::from(&bytes));
        prop_assert!(entry.deleted);
        prop_assert_eq!(entry.filename.as_str(), DELETED_FILENAME);
    }

    #[test]
    fn unknown_markers_are_unclassified(marker in any::<u8>(), length in any::<u16>()) {
        prop_assume!(!matches!(marker & 0x7F, b'A' | b'I' | b'T' | b'B'));
        let entry = decode(RawRecord::from(&make_record("X", marker, 1, 0, length, 0)));
        prop_assert_eq!(classify(&entry), (ContentKind::Unclassified, FilterHint::GenericBinary));
    }

    #[test]
    fn content_is_exact_or_fails(blocks in 0u8..8, length in 0u16..2500, start in 0u16..8, image_blocks in 0usize..16) {
        let image = ramp_image(image_blocks);
        let mut store = ImageStore::new(Cursor::new(image.clone()));
        let entry = decode(RawRecord::from(&make_record("P", b'B', blocks, 0, length, start)));
        match read_content(&entry, &mut store) {
            Ok(data) => {
                prop_assert_eq!(data.len(), length as usize);
                if length > 0 {
                    let from = start as usize * BLOCK_SIZE;
                    prop_assert_eq!(&data[..], &image[from..from + length as usize]);
                }
            }
            Err(RdosError::TruncatedRead { .. }) => {
                let available = image_blocks.saturating_sub(start as usize).min(blocks as usize) * BLOCK_SIZE;
                prop_assert!(available < blocks as usize * BLOCK_SIZE || available < length as usize);
            }
            Err(e) => prop_assert!(false, "unexpected error {e}"),
        }
    }
}
