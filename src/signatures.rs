//! The fixed table of recognised image signatures.
//!
//! Order matters: when two patterns match at the same offset the earlier
//! entry wins (PNG, JPEG, GIF, BMP).

use crate::types::{ImageFormat, Offset, UNKNOWN_LABEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignaturePattern {
    pub bytes: &'static [u8],
    pub format: ImageFormat,
}

impl SignaturePattern {
    const fn new(bytes: &'static [u8], format: ImageFormat) -> Self {
        assert!(!bytes.is_empty());
        Self { bytes, format }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// True when the whole pattern fits in `buffer` at `offset` and every byte matches.
    #[inline]
    pub fn matches_at(&self, buffer: &[u8], offset: Offset) -> bool {
        offset
            .checked_add(self.bytes.len())
            .and_then(|end| buffer.get(offset..end))
            .is_some_and(|window| window == self.bytes)
    }
}

pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
pub const JPEG_SIGNATURE: [u8; 3] = [0xFF, 0xD8, 0xFF];
pub const GIF_SIGNATURE: [u8; 4] = [0x47, 0x49, 0x46, 0x38];
pub const BMP_SIGNATURE: [u8; 2] = [0x42, 0x4D];

pub const SIGNATURE_COUNT: usize = 4;

/// All known signatures in priority order.
pub static SIGNATURES: [SignaturePattern; SIGNATURE_COUNT] = [
    SignaturePattern::new(&PNG_SIGNATURE, ImageFormat::Png),
    SignaturePattern::new(&JPEG_SIGNATURE, ImageFormat::Jpeg),
    SignaturePattern::new(&GIF_SIGNATURE, ImageFormat::Gif),
    SignaturePattern::new(&BMP_SIGNATURE, ImageFormat::Bmp),
];

/// Length of the shortest signature; buffers below this size never match.
pub const MIN_SIGNATURE_LEN: usize = BMP_SIGNATURE.len();

pub fn signature_for(format: ImageFormat) -> &'static SignaturePattern {
    match format {
        ImageFormat::Png => &SIGNATURES[0],
        ImageFormat::Jpeg => &SIGNATURES[1],
        ImageFormat::Gif => &SIGNATURES[2],
        ImageFormat::Bmp => &SIGNATURES[3],
    }
}

/// Returns the highest-priority format whose signature starts at `offset`.
pub fn match_at(buffer: &[u8], offset: Offset) -> Option<ImageFormat> {
    SIGNATURES
        .iter()
        .find(|sig| sig.matches_at(buffer, offset))
        .map(|sig| sig.format)
}

/// Identifies the buffer by its leading bytes only.
pub fn detect_format(buffer: &[u8]) -> Option<ImageFormat> {
    match_at(buffer, 0)
}

/// Like [`detect_format`], returning `"UNKNOWN"` for unrecognised input.
pub fn detect_format_label(buffer: &[u8]) -> &'static str {
    detect_format(buffer).map_or(UNKNOWN_LABEL, |f| f.label())
}
