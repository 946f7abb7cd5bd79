use magic_image::analysis::{analyze_with, enumerate_segments_with};
use magic_image::signatures::SIGNATURES;
use magic_image::{ImageFormat, ScanOptions, SignatureMatch, scan};
use proptest::prelude::*;

/// Offset-by-offset reference search, trying the table in priority order.
fn naive_scan(buffer: &[u8], from: usize) -> SignatureMatch {
    for pos in from..buffer.len() {
        for sig in &SIGNATURES {
            if pos + sig.bytes.len() <= buffer.len() && &buffer[pos..pos + sig.bytes.len()] == sig.bytes {
                return SignatureMatch::new(pos, sig.format);
            }
        }
    }
    SignatureMatch::not_found()
}

/// Bytes drawn mostly from signature alphabets so matches are frequent.
fn signature_heavy_bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    let byte = prop_oneof![
        Just(0x00u8),
        Just(0x42),
        Just(0x4D),
        Just(0x47),
        Just(0x49),
        Just(0x46),
        Just(0x38),
        Just(0xFF),
        Just(0xD8),
        Just(0x89),
        Just(0x50),
        Just(0x4E),
        any::<u8>(),
    ];
    prop::collection::vec(byte, 0..max_len)
}

proptest! {
    #[test]
    fn scan_matches_reference(data in signature_heavy_bytes(256), from in 0usize..300) {
        prop_assert_eq!(scan(&data, from), naive_scan(&data, from));
    }

    #[test]
    fn segments_are_ordered_and_in_bounds(
        data in signature_heavy_bytes(512),
        min_gap in 0usize..64,
        limit in 0usize..16,
    ) {
        let options = ScanOptions::new().with_min_gap(min_gap).with_segment_limit(limit);
        let map = enumerate_segments_with(&data, &options);

        prop_assert!(map.len() <= limit);
        let mut prev_end = 0;
        for seg in &map.segments {
            prop_assert!(seg.start < seg.end);
            prop_assert!(seg.end <= data.len());
            prop_assert!(seg.start >= prev_end);
            prev_end = seg.end;
        }
        if map.truncated {
            prop_assert_eq!(map.len(), limit);
        }
    }

    #[test]
    fn analyze_is_deterministic(data in signature_heavy_bytes(512), min_gap in 1usize..64) {
        let options = ScanOptions::new().with_min_gap(min_gap);
        prop_assert_eq!(analyze_with(&data, &options), analyze_with(&data, &options));
    }

    #[test]
    fn detected_prefix_starts_first_segment(tail in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut data = SIGNATURES[0].bytes.to_vec();
        data.extend(tail);
        let map = enumerate_segments_with(&data, &ScanOptions::default());

        prop_assert_eq!(map.segments[0].start, 0);
        prop_assert_eq!(map.segments[0].format, ImageFormat::Png);
    }
}
