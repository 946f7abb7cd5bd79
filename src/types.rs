use serde::Serialize;
use std::fmt;
use std::ops::Range;

pub type Offset = usize;

pub const UNKNOWN_LABEL: &str = "UNKNOWN";
pub const UNKNOWN_EXTENSION: &str = "bin";
pub const UNKNOWN_MIME: &str = "application/octet-stream";

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    pub fn label(&self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Bmp => "BMP",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label for an optional format, `UNKNOWN` when absent.
pub fn format_label(format: Option<ImageFormat>) -> &'static str {
    format.map_or(UNKNOWN_LABEL, |f| f.label())
}

pub fn format_extension(format: Option<ImageFormat>) -> &'static str {
    format.map_or(UNKNOWN_EXTENSION, |f| f.extension())
}

pub fn format_mime_type(format: Option<ImageFormat>) -> &'static str {
    format.map_or(UNKNOWN_MIME, |f| f.mime_type())
}

/// Result of a single signature search. `format` is `None` when nothing matched,
/// in which case `offset` is meaningless and reported as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureMatch {
    pub offset: Offset,
    pub format: Option<ImageFormat>,
}

impl SignatureMatch {
    pub fn new(offset: Offset, format: ImageFormat) -> Self {
        Self {
            offset,
            format: Some(format),
        }
    }

    pub fn not_found() -> Self {
        Self {
            offset: 0,
            format: None,
        }
    }

    #[inline]
    pub fn found(&self) -> bool {
        self.format.is_some()
    }

    pub fn label(&self) -> &'static str {
        format_label(self.format)
    }

    /// End of the segment that begins before this boundary: the match offset
    /// when found, otherwise the end of the buffer.
    #[inline]
    pub fn boundary_or(&self, buffer_len: usize) -> Offset {
        if self.found() { self.offset } else { buffer_len }
    }
}

/// A `[start, end)` byte range believed to hold one embedded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub start: Offset,
    pub end: Offset,
    pub format: ImageFormat,
}

impl Segment {
    pub fn new(start: Offset, end: Offset, format: ImageFormat) -> Self {
        debug_assert!(start < end, "segment must be non-empty");
        Self { start, end, format }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub fn range(&self) -> Range<Offset> {
        self.start..self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Classification {
    NoImage,
    SingleImage,
    Composite { segments: usize },
}

impl Classification {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => Classification::NoImage,
            1 => Classification::SingleImage,
            n => Classification::Composite { segments: n },
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Classification::Composite { .. })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::NoImage => f.write_str("no recognizable image"),
            Classification::SingleImage => f.write_str("ordinary single image"),
            Classification::Composite { segments } => {
                write!(f, "composite (magic) image containing {} segments", segments)
            }
        }
    }
}
