//! File-level operations.
//!
//! Each operation reads its inputs, runs the core, writes any output and
//! reports an [`Outcome`]. Errors never escape: they become a failed outcome
//! with a readable message.

use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analysis::{AnalysisReport, analyze_with};
use crate::composition::{CompositeLayout, compose_with_layout};
use crate::error::{MagicError, Result};
use crate::extraction::{Extracted, default_output_name, extract_first_with, extract_hidden_with};
use crate::io::{read_whole_file, write_whole_file};
use crate::options::ScanOptions;
use crate::signatures::detect_format;
use crate::types::format_label;

#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
    pub output: Option<PathBuf>,
    pub bytes_written: Option<usize>,
    pub layout: Option<CompositeLayout>,
    pub report: Option<AnalysisReport>,
}

impl Outcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            ..Default::default()
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    fn from_error(context: &str, err: &MagicError) -> Self {
        warn!(%err, "{}", context);
        let mut message = format!("{}: {}", context, err);
        if matches!(err, MagicError::NoHiddenSegment { .. }) {
            message.push_str(
                " (this may not be a magic image, or the hidden image format is not supported)",
            );
        }
        Self::failed(message)
    }
}

/// Concatenates two image files into `output`.
pub fn create_magic_image(first: &Path, second: &Path, output: &Path) -> Outcome {
    match try_create(first, second, output) {
        Ok(outcome) => outcome,
        Err(err) => Outcome::from_error("failed to create magic image", &err),
    }
}

fn try_create(first: &Path, second: &Path, output: &Path) -> Result<Outcome> {
    let first_data = read_whole_file(first)?;
    info!(
        path = %first.display(),
        format = format_label(detect_format(&first_data)),
        size = first_data.len(),
        "first image read"
    );

    let second_data = read_whole_file(second)?;
    info!(
        path = %second.display(),
        format = format_label(detect_format(&second_data)),
        size = second_data.len(),
        "second image read"
    );

    let (combined, layout) = compose_with_layout(&first_data, &second_data)?;
    write_whole_file(output, &combined)?;

    let mut outcome = Outcome::ok(format!(
        "magic image written to {} ({} bytes)",
        output.display(),
        combined.len()
    ));
    outcome.output = Some(output.to_path_buf());
    outcome.bytes_written = Some(combined.len());
    outcome.layout = Some(layout);
    Ok(outcome)
}

/// Which embedded image a view operation extracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The first image, the one ordinary viewers display.
    Normal,
    /// The hidden second image.
    Magic,
}

impl ViewMode {
    fn index(self) -> usize {
        match self {
            ViewMode::Normal => 1,
            ViewMode::Magic => 2,
        }
    }

    fn extract<'a>(self, data: &'a [u8], options: &ScanOptions) -> Result<Extracted<'a>> {
        match self {
            ViewMode::Normal => extract_first_with(data, options),
            ViewMode::Magic => extract_hidden_with(data, options),
        }
    }

    fn failure_context(self) -> &'static str {
        match self {
            ViewMode::Normal => "failed to extract first image",
            ViewMode::Magic => "failed to extract hidden image",
        }
    }
}

pub fn view_normal(input: &Path, output: Option<&Path>, options: &ScanOptions) -> Outcome {
    view(input, output, ViewMode::Normal, options)
}

pub fn view_magic(input: &Path, output: Option<&Path>, options: &ScanOptions) -> Outcome {
    view(input, output, ViewMode::Magic, options)
}

/// Extracts one embedded image to `output`, or to `extracted_image_<n>.<ext>`
/// in the working directory when no path is given.
pub fn view(input: &Path, output: Option<&Path>, mode: ViewMode, options: &ScanOptions) -> Outcome {
    match try_view(input, output, mode, options) {
        Ok(outcome) => outcome,
        Err(err) => Outcome::from_error(mode.failure_context(), &err),
    }
}

fn try_view(
    input: &Path,
    output: Option<&Path>,
    mode: ViewMode,
    options: &ScanOptions,
) -> Result<Outcome> {
    let data = read_whole_file(input)?;
    let extracted = mode.extract(&data, options)?;
    let target = match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(default_output_name(mode.index(), extracted.format())),
    };
    write_whole_file(&target, extracted.bytes)?;

    let segment = extracted.segment;
    info!(
        format = %segment.format,
        start = segment.start,
        end = segment.end,
        size = segment.len(),
        mime = segment.format.mime_type(),
        path = %target.display(),
        "image extracted"
    );

    let mut outcome = Outcome::ok(format!(
        "{} image extracted to {} ({} bytes, offsets {}..{})",
        segment.format,
        target.display(),
        segment.len(),
        segment.start,
        segment.end
    ));
    outcome.output = Some(target);
    outcome.bytes_written = Some(segment.len());
    Ok(outcome)
}

/// Enumerates the segments of a file.
pub fn analyze_file(input: &Path, options: &ScanOptions) -> Outcome {
    match read_whole_file(input) {
        Ok(data) => {
            let report = analyze_with(&data, options);
            let mut outcome = Outcome::ok(report.classification.to_string());
            outcome.report = Some(report);
            outcome
        }
        Err(err) => Outcome::from_error("failed to analyze file", &err),
    }
}
