use std::ops::Range;
use tracing::{info, warn};

use crate::error::{MagicError, Result};
use crate::signatures::detect_format;
use crate::types::{ImageFormat, format_label};

/// Where each input landed inside a composite buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeLayout {
    pub first: Range<usize>,
    pub second: Range<usize>,
    pub first_format: Option<ImageFormat>,
    pub second_format: Option<ImageFormat>,
}

impl CompositeLayout {
    pub fn total_size(&self) -> usize {
        self.second.end
    }

    pub fn has_unknown_format(&self) -> bool {
        self.first_format.is_none() || self.second_format.is_none()
    }
}

/// Concatenates `first` and `second` byte for byte.
pub fn compose(first: &[u8], second: &[u8]) -> Result<Vec<u8>> {
    if first.is_empty() {
        return Err(MagicError::EmptyInput("first image".to_string()));
    }
    if second.is_empty() {
        return Err(MagicError::EmptyInput("second image".to_string()));
    }

    let mut out = Vec::with_capacity(first.len() + second.len());
    out.extend_from_slice(first);
    out.extend_from_slice(second);
    Ok(out)
}

pub fn build_composite(first: &[u8], second: &[u8]) -> Result<Vec<u8>> {
    compose_with_layout(first, second).map(|(combined, _)| combined)
}

/// Composes two images and describes the resulting layout.
///
/// Unrecognised inputs are logged but still composed.
pub fn compose_with_layout(first: &[u8], second: &[u8]) -> Result<(Vec<u8>, CompositeLayout)> {
    let combined = compose(first, second)?;

    let first_format = detect_format(first);
    let second_format = detect_format(second);
    let layout = CompositeLayout {
        first: 0..first.len(),
        second: first.len()..combined.len(),
        first_format,
        second_format,
    };

    if layout.has_unknown_format() {
        warn!(
            first = format_label(first_format),
            second = format_label(second_format),
            "unknown image format detected; composing anyway"
        );
    }
    info!(
        total = layout.total_size(),
        first = ?layout.first,
        second = ?layout.second,
        "composite built"
    );

    Ok((combined, layout))
}
