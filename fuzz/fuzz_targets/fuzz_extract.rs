#![no_main]

use libfuzzer_sys::fuzz_target;
use magic_image::{extract_first, extract_hidden};

fuzz_target!(|data: &[u8]| {
    if let Ok(first) = extract_first(data) {
        assert_eq!(first.bytes.len(), first.segment.len());
    }
    if let Ok(hidden) = extract_hidden(data) {
        assert!(hidden.segment.start > 0);
    }
});
