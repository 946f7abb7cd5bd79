pub mod analysis;
pub mod composition;
pub mod error;
pub mod extraction;
pub mod io;
pub mod operations;
pub mod options;
pub mod scanner;
pub mod signatures;
pub mod types;

pub use analysis::{AnalysisReport, SegmentMap, SegmentReport, analyze, enumerate_segments};
pub use composition::{CompositeLayout, build_composite, compose};
pub use error::{MagicError, Result};
pub use extraction::{Extracted, extract_first, extract_hidden};
pub use options::ScanOptions;
pub use scanner::{DEFAULT_MIN_GAP, SignatureScanner, next_boundary, scan};
pub use signatures::{detect_format, detect_format_label};
pub use types::{Classification, ImageFormat, Offset, Segment, SignatureMatch};
