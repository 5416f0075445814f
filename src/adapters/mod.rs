//! Adapter interfaces for the external transcoder.
//!
//! The transcoder is an opaque collaborator: it is handed an input path,
//! an encoding profile and an output path, and either produces the output
//! file or it doesn't. Callers judge success by looking for the output, not
//! by the process exit code.

pub mod ffmpeg;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::EncodingProfile;

// Re-export the ffmpeg adapter
pub use ffmpeg::FfmpegTranscoder;

/// Errors that can occur when launching the transcoder
#[derive(Debug, Error)]
pub enum TranscoderError {
    /// The binary could not be found on PATH. Fatal: nothing can be converted.
    #[error("Transcoder binary '{0}' not found; is it installed and on PATH?")]
    NotFound(String),

    #[error("Failed to run transcoder for {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TranscoderError {
    /// Whether the error should stop all further processing
    pub fn is_fatal(&self) -> bool {
        matches!(self, TranscoderError::NotFound(_))
    }
}

/// How the transcoder process exited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodeStatus {
    /// Exit code, `None` if killed by a signal
    pub exit_code: Option<i32>,
}

impl TranscodeStatus {
    pub fn success() -> Self {
        Self { exit_code: Some(0) }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Trait for external transcoders
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Human-readable transcoder name
    fn name(&self) -> &str;

    /// Convert `input` into `output` using `profile`, blocking until the
    /// process exits.
    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &EncodingProfile,
    ) -> Result<TranscodeStatus, TranscoderError>;
}
