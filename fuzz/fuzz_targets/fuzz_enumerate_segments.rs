#![no_main]

use libfuzzer_sys::fuzz_target;
use magic_image::analysis::enumerate_segments_with;
use magic_image::ScanOptions;

fuzz_target!(|data: &[u8]| {
    let Some((&gap, rest)) = data.split_first() else {
        return;
    };
    let options = ScanOptions::new().with_min_gap(gap as usize);
    let map = enumerate_segments_with(rest, &options);

    let mut prev_end = 0;
    for seg in &map.segments {
        assert!(seg.start < seg.end && seg.end <= rest.len());
        assert!(seg.start >= prev_end);
        prev_end = seg.end;
    }
});
