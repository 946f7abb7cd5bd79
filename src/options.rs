//! Tunables for segmentation.

use crate::scanner::DEFAULT_MIN_GAP;

/// Hard cap on the number of segments one analysis will emit.
pub const DEFAULT_SEGMENT_LIMIT: usize = 10;

/// Options controlling how a buffer is split into segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Bytes skipped past a signature before searching for the next one
    pub min_gap: usize,
    /// Maximum number of segments emitted before truncating
    pub segment_limit: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            min_gap: DEFAULT_MIN_GAP,
            segment_limit: DEFAULT_SEGMENT_LIMIT,
        }
    }
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_gap(mut self, min_gap: usize) -> Self {
        self.min_gap = min_gap;
        self
    }

    /// Gap actually applied when segmenting. A zero gap would let a segment
    /// end at its own start, so it is raised to one byte.
    #[inline]
    pub fn effective_min_gap(&self) -> usize {
        self.min_gap.max(1)
    }

    pub fn with_segment_limit(mut self, limit: usize) -> Self {
        self.segment_limit = limit;
        self
    }
}
