//! Conversion jobs and their outcomes.
//!
//! A job is nothing more than an input file paired with the directory its
//! converted copy should land in. Whether a job still has work to do is
//! inferred from the filesystem alone: there is no manifest of completed
//! conversions.

use std::fmt;
use std::path::{Path, PathBuf};

/// A single input file scheduled for conversion into `output_directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Source video
    pub input_path: PathBuf,

    /// Directory receiving the converted file
    pub output_directory: PathBuf,
}

impl ConversionJob {
    pub fn new(input_path: impl Into<PathBuf>, output_directory: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_directory: output_directory.into(),
        }
    }

    /// Derived output path: `output_directory/<input stem>.<extension>`
    pub fn output_path(&self, extension: &str) -> PathBuf {
        output_path_for(&self.input_path, &self.output_directory, extension)
    }

    /// A job is skippable iff its output already exists as a regular file.
    pub fn is_skippable(&self, extension: &str) -> bool {
        self.output_path(extension).is_file()
    }

    /// File name of the input, for log lines
    pub fn input_name(&self) -> String {
        self.input_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

/// Build the output path for `input` inside `output_directory`.
///
/// The base name is preserved and only the final extension is replaced, so
/// `clip.final.mp4` becomes `clip.final.mov`.
pub fn output_path_for(input: &Path, output_directory: &Path, extension: &str) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    output_directory.join(format!("{}.{}", stem, extension))
}

/// What happened to a single job
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Output already existed; the transcoder was not invoked
    Skipped,

    /// Transcoder ran and the output file materialized
    Converted,

    /// Transcoder ran (or could not be started) and no output exists
    Failed,
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionOutcome::Skipped => write!(f, "skipped"),
            ConversionOutcome::Converted => write!(f, "converted"),
            ConversionOutcome::Failed => write!(f, "failed"),
        }
    }
}
