use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::options::ScanOptions;
use crate::scanner::SignatureScanner;
use crate::types::{Classification, ImageFormat, Segment};

/// Segments found in one buffer, in ascending offset order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMap {
    pub segments: Vec<Segment>,
    /// Set when the segment limit stopped enumeration while more signatures remained.
    pub truncated: bool,
}

impl SegmentMap {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn classification(&self) -> Classification {
        Classification::from_count(self.segments.len())
    }
}

pub fn enumerate_segments(buffer: &[u8]) -> SegmentMap {
    enumerate_segments_with(buffer, &ScanOptions::default())
}

/// Walks the buffer segment by segment.
///
/// Each segment starts at the next signature at or after the previous
/// segment's end and stops at the first signature at least `min_gap` bytes
/// past its own start, or at the end of the buffer. Unrecognised trailing
/// bytes are not reported.
pub fn enumerate_segments_with(buffer: &[u8], options: &ScanOptions) -> SegmentMap {
    let scanner = SignatureScanner::global();
    let mut segments = Vec::new();
    let mut pos = 0;

    while pos < buffer.len() && segments.len() < options.segment_limit {
        let m = scanner.scan(buffer, pos);
        let Some(format) = m.format else {
            break;
        };

        let next = scanner.next_boundary(buffer, m.offset, options.effective_min_gap());
        let end = next.boundary_or(buffer.len());

        debug!(start = m.offset, end, %format, "segment");
        segments.push(Segment::new(m.offset, end, format));
        pos = end;
    }

    let truncated = segments.len() >= options.segment_limit
        && pos < buffer.len()
        && scanner.scan(buffer, pos).found();
    if truncated {
        warn!(
            limit = options.segment_limit,
            "segment limit reached; remaining signatures ignored"
        );
    }

    SegmentMap {
        segments,
        truncated,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentReport {
    pub index: usize,
    pub format: ImageFormat,
    pub start: usize,
    pub end: usize,
    pub size: usize,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub total_size: usize,
    pub segments: Vec<SegmentReport>,
    pub classification: Classification,
    pub truncated: bool,
    pub is_magic_image: bool,
}

impl AnalysisReport {
    pub fn segment_ranges(&self) -> Vec<Segment> {
        self.segments
            .iter()
            .map(|s| Segment::new(s.start, s.end, s.format))
            .collect()
    }
}

pub fn analyze(buffer: &[u8]) -> AnalysisReport {
    analyze_with(buffer, &ScanOptions::default())
}

pub fn analyze_with(buffer: &[u8], options: &ScanOptions) -> AnalysisReport {
    let map = enumerate_segments_with(buffer, options);
    let classification = map.classification();

    let segments = map
        .segments
        .iter()
        .enumerate()
        .map(|(i, seg)| SegmentReport {
            index: i + 1,
            format: seg.format,
            start: seg.start,
            end: seg.end,
            size: seg.len(),
            sha256: sha256_hex(&buffer[seg.range()]),
        })
        .collect();

    AnalysisReport {
        total_size: buffer.len(),
        segments,
        classification,
        truncated: map.truncated,
        is_magic_image: classification.is_composite(),
    }
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
