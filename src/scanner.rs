use memchr::memmem::Finder;
use std::sync::LazyLock;
use tracing::trace;

use crate::signatures::{SIGNATURE_COUNT, SIGNATURES};
use crate::types::{ImageFormat, Offset, SignatureMatch};

/// Minimum distance skipped past a found signature before looking for the
/// next one. Images smaller than this are invisible to segmentation.
pub const DEFAULT_MIN_GAP: usize = 1000;

static DEFAULT_SCANNER: LazyLock<SignatureScanner> = LazyLock::new(SignatureScanner::new);

/// Finds the earliest known signature in a buffer.
///
/// Each pattern gets its own `memmem` finder; the overall result is the
/// lowest offset over all patterns, with table order breaking ties. This is
/// the same answer as trying every pattern at every offset in turn.
#[derive(Debug, Clone)]
pub struct SignatureScanner {
    finders: [(Finder<'static>, ImageFormat); SIGNATURE_COUNT],
}

impl Default for SignatureScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SignatureScanner {
    #[must_use]
    pub fn new() -> Self {
        Self {
            finders: SIGNATURES.map(|sig| (Finder::new(sig.bytes), sig.format)),
        }
    }

    /// Shared scanner over the static signature table.
    pub fn global() -> &'static SignatureScanner {
        &DEFAULT_SCANNER
    }

    #[must_use]
    pub fn scan(&self, buffer: &[u8], from: Offset) -> SignatureMatch {
        let Some(haystack) = buffer.get(from..).filter(|h| !h.is_empty()) else {
            return SignatureMatch::not_found();
        };

        let mut best: Option<(usize, ImageFormat)> = None;
        for (finder, format) in &self.finders {
            if let Some(pos) = finder.find(haystack) {
                // strict `<` keeps the earlier table entry on ties
                if best.is_none_or(|(current, _)| pos < current) {
                    best = Some((pos, *format));
                }
            }
        }

        match best {
            Some((pos, format)) => {
                trace!(offset = from + pos, %format, "signature found");
                SignatureMatch::new(from + pos, format)
            }
            None => SignatureMatch::not_found(),
        }
    }

    /// Looks for the signature that ends the segment starting at `after`.
    ///
    /// The search resumes `min_gap` bytes past `after`; not-found means the
    /// current segment runs to the end of the buffer.
    #[must_use]
    pub fn next_boundary(&self, buffer: &[u8], after: Offset, min_gap: usize) -> SignatureMatch {
        let search_start = after.saturating_add(min_gap);
        if search_start >= buffer.len() {
            return SignatureMatch::not_found();
        }
        self.scan(buffer, search_start)
    }

    /// Returns every match found by repeated scanning, each one starting the
    /// next search immediately after the previous match.
    #[must_use]
    pub fn scan_all(&self, buffer: &[u8]) -> Vec<SignatureMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;
        loop {
            let m = self.scan(buffer, pos);
            if !m.found() {
                break;
            }
            matches.push(m);
            pos = m.offset + 1;
        }
        matches
    }
}

#[inline]
pub fn scan(buffer: &[u8], from: Offset) -> SignatureMatch {
    SignatureScanner::global().scan(buffer, from)
}

#[inline]
pub fn next_boundary(buffer: &[u8], after: Offset, min_gap: usize) -> SignatureMatch {
    SignatureScanner::global().next_boundary(buffer, after, min_gap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signatures::{BMP_SIGNATURE, GIF_SIGNATURE, JPEG_SIGNATURE, PNG_SIGNATURE};

    #[test]
    fn scan_finds_jpeg_at_offset() {
        let buffer: Vec<u8> = [
            &[0x00, 0x11, 0x22, 0x33, 0x44][..],
            &JPEG_SIGNATURE[..],
            &[0xE0, 0x00, 0x10][..],
        ]
        .concat();

        let m = scan(&buffer, 0);
        assert!(m.found());
        assert_eq!(m.offset, 5);
        assert_eq!(m.format, Some(ImageFormat::Jpeg));
    }

    #[test]
    fn scan_prefers_lowest_offset_over_priority() {
        // BMP at 1 comes before PNG at 4 even though PNG ranks higher
        let buffer: Vec<u8> = [&[0x00][..], &BMP_SIGNATURE[..], &[0x00][..], &PNG_SIGNATURE[..]].concat();

        let m = scan(&buffer, 0);
        assert_eq!(m.offset, 1);
        assert_eq!(m.format, Some(ImageFormat::Bmp));
    }

    #[test]
    fn scan_respects_from_offset() {
        let buffer: Vec<u8> = [&GIF_SIGNATURE[..], &[0x00; 4][..], &GIF_SIGNATURE[..]].concat();

        assert_eq!(scan(&buffer, 0).offset, 0);
        assert_eq!(scan(&buffer, 1).offset, 8);
        assert!(!scan(&buffer, 9).found());
    }

    #[test]
    fn scan_from_at_or_past_end() {
        let buffer = PNG_SIGNATURE.to_vec();
        assert!(!scan(&buffer, buffer.len()).found());
        assert!(!scan(&buffer, buffer.len() + 10).found());
        assert!(!scan(&[], 0).found());
    }

    #[test]
    fn scan_partial_signature_at_tail() {
        let buffer = vec![0x00, 0x00, 0xFF, 0xD8];
        assert!(!scan(&buffer, 0).found());
    }

    #[test]
    fn next_boundary_skips_min_gap() {
        let mut buffer = vec![0u8; 64];
        buffer[..3].copy_from_slice(&JPEG_SIGNATURE);
        buffer[10..13].copy_from_slice(&JPEG_SIGNATURE);
        buffer[40..42].copy_from_slice(&BMP_SIGNATURE);

        let m = next_boundary(&buffer, 0, 20);
        assert_eq!(m.offset, 40);
        assert_eq!(m.format, Some(ImageFormat::Bmp));

        let m = next_boundary(&buffer, 0, 5);
        assert_eq!(m.offset, 10);
    }

    #[test]
    fn next_boundary_gap_beyond_buffer() {
        let buffer = vec![0x42, 0x4D, 0x42, 0x4D];
        assert!(!next_boundary(&buffer, 0, 4).found());
        assert!(!next_boundary(&buffer, 0, DEFAULT_MIN_GAP).found());
        assert!(!next_boundary(&buffer, usize::MAX, 1).found());
        assert_eq!(next_boundary(&buffer, 0, 2).offset, 2);
    }

    #[test]
    fn scan_all_reports_overlapping_candidates() {
        let buffer: Vec<u8> = [&[0x00][..], &JPEG_SIGNATURE[..], &[0x00][..], &BMP_SIGNATURE[..]].concat();

        let offsets: Vec<Offset> = SignatureScanner::new()
            .scan_all(&buffer)
            .iter()
            .map(|m| m.offset)
            .collect();
        assert_eq!(offsets, vec![1, 5]);
    }

    #[test]
    fn scanner_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SignatureScanner>();
    }
}
