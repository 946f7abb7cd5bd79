use tracing::debug;

use crate::error::{MagicError, Result};
use crate::options::ScanOptions;
use crate::scanner::SignatureScanner;
use crate::types::{ImageFormat, Segment};

/// A segment together with the bytes it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extracted<'a> {
    pub segment: Segment,
    pub bytes: &'a [u8],
}

impl Extracted<'_> {
    pub fn format(&self) -> ImageFormat {
        self.segment.format
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }
}

pub fn extract_first(buffer: &[u8]) -> Result<Extracted<'_>> {
    extract_first_with(buffer, &ScanOptions::default())
}

/// Returns the first embedded image: from the first signature up to the next
/// boundary, or the end of the buffer.
pub fn extract_first_with<'a>(buffer: &'a [u8], options: &ScanOptions) -> Result<Extracted<'a>> {
    let scanner = SignatureScanner::global();

    let first = scanner.scan(buffer, 0);
    let format = first.format.ok_or(MagicError::NoSignatureFound)?;

    let next = scanner.next_boundary(buffer, first.offset, options.effective_min_gap());
    if next.found() {
        debug!(next = next.offset, "next image found");
    } else {
        debug!("no further image, using end of buffer");
    }
    let end = next.boundary_or(buffer.len());

    slice_segment(buffer, first.offset, end, format)
}

pub fn extract_hidden(buffer: &[u8]) -> Result<Extracted<'_>> {
    extract_hidden_with(buffer, &ScanOptions::default())
}

/// Returns the second embedded image, the one an ordinary viewer never shows.
pub fn extract_hidden_with<'a>(buffer: &'a [u8], options: &ScanOptions) -> Result<Extracted<'a>> {
    let scanner = SignatureScanner::global();
    let gap = options.effective_min_gap();

    let first = scanner.scan(buffer, 0);
    if !first.found() {
        return Err(MagicError::NoSignatureFound);
    }

    let hidden = scanner.next_boundary(buffer, first.offset, gap);
    let Some(format) = hidden.format else {
        return Err(MagicError::NoHiddenSegment {
            after: first.offset,
        });
    };
    debug!(first = first.offset, hidden = hidden.offset, %format, "hidden image found");

    let third = scanner.next_boundary(buffer, hidden.offset, gap);
    let end = third.boundary_or(buffer.len());

    slice_segment(buffer, hidden.offset, end, format)
}

/// Bounds-checked view of `buffer[start..end]`.
pub fn slice_range(buffer: &[u8], start: usize, end: usize) -> Result<&[u8]> {
    if start >= buffer.len() || end > buffer.len() || start >= end {
        return Err(MagicError::InvalidRange {
            start,
            end,
            len: buffer.len(),
        });
    }
    Ok(&buffer[start..end])
}

fn slice_segment(
    buffer: &[u8],
    start: usize,
    end: usize,
    format: ImageFormat,
) -> Result<Extracted<'_>> {
    let bytes = slice_range(buffer, start, end)?;
    Ok(Extracted {
        segment: Segment::new(start, end, format),
        bytes,
    })
}

/// File name used when the caller gives no output path, e.g. `extracted_image_2.png`.
pub fn default_output_name(index: usize, format: ImageFormat) -> String {
    format!("extracted_image_{}.{}", index, format.extension())
}
