//! Conversion job runner.
//!
//! Converts a single input file into the output directory, unless the
//! output already exists. The skip-if-exists check is the only thing
//! preventing repeated work across repeated triggers, so it must run
//! before every transcoder invocation.

use std::path::Path;
use std::sync::Arc;

use crate::adapters::{Transcoder, TranscoderError};
use crate::config::Config;
use crate::domain::{ConversionJob, ConversionOutcome};

/// Runs one conversion job at a time against a transcoder
#[derive(Clone)]
pub struct JobRunner {
    config: Arc<Config>,
    transcoder: Arc<dyn Transcoder>,
}

impl JobRunner {
    pub fn new(config: Arc<Config>, transcoder: Arc<dyn Transcoder>) -> Self {
        Self { config, transcoder }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert `input` into `output_dir`.
    ///
    /// Per-file problems are logged and reported as
    /// [`ConversionOutcome::Failed`]. The only error returned is a fatal
    /// transcoder error (binary missing), which should stop all processing.
    pub async fn convert(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<ConversionOutcome, TranscoderError> {
        self.run_job(&ConversionJob::new(input, output_dir)).await
    }

    /// Run a prepared job. See [`JobRunner::convert`].
    pub async fn run_job(&self, job: &ConversionJob) -> Result<ConversionOutcome, TranscoderError> {
        if let Err(e) = tokio::fs::create_dir_all(&job.output_directory).await {
            tracing::error!(
                "Failed to create output directory {}: {}",
                job.output_directory.display(),
                e
            );
            return Ok(ConversionOutcome::Failed);
        }

        let extension = &self.config.output_extension;
        let output_path = job.output_path(extension);

        if job.is_skippable(extension) {
            tracing::info!("[Skipping] {} already exists", output_path.display());
            return Ok(ConversionOutcome::Skipped);
        }

        tracing::info!(
            "Converting: {} -> {}",
            job.input_name(),
            output_path.file_name().unwrap_or_default().to_string_lossy()
        );

        match self
            .transcoder
            .transcode(&job.input_path, &output_path, &self.config.profile)
            .await
        {
            // Exit code is informational only; the tool may warn but still succeed
            Ok(status) if status.is_success() => {
                tracing::debug!("{} finished {}", self.transcoder.name(), job.input_name());
            }
            Ok(status) => {
                tracing::warn!(
                    "{} exited with {:?} for {}",
                    self.transcoder.name(),
                    status.exit_code,
                    job.input_name()
                );
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!("{}", e);
            }
        }

        if output_path.is_file() {
            tracing::info!("Conversion complete: {}", output_path.display());
            Ok(ConversionOutcome::Converted)
        } else {
            tracing::error!("Error converting: {}", job.input_name());
            Ok(ConversionOutcome::Failed)
        }
    }
}
