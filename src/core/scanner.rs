//! Batch scanner.
//!
//! Enumerates the inputs sitting directly inside a source directory and
//! drives the job runner over each one, strictly one after another so two
//! transcodes never compete for the same CPU/GPU.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::runner::JobRunner;
use crate::adapters::TranscoderError;
use crate::config::Config;
use crate::domain::ConversionOutcome;

/// Errors that abort a batch pass
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {path}: {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Transcoder(#[from] TranscoderError),
}

impl ScanError {
    /// Whether no further batch can succeed either
    pub fn is_fatal(&self) -> bool {
        match self {
            ScanError::Transcoder(e) => e.is_fatal(),
            _ => false,
        }
    }
}

/// Result of a batch pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub found: usize,
    pub skipped: usize,
    pub converted: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn record(&mut self, outcome: ConversionOutcome) {
        match outcome {
            ConversionOutcome::Skipped => self.skipped += 1,
            ConversionOutcome::Converted => self.converted += 1,
            ConversionOutcome::Failed => self.failed += 1,
        }
    }

    /// Number of transcoder invocations made during the pass
    pub fn attempted(&self) -> usize {
        self.converted + self.failed
    }
}

/// Scans a directory and converts every matching file in it
#[derive(Clone)]
pub struct BatchScanner {
    runner: JobRunner,
}

impl BatchScanner {
    pub fn new(runner: JobRunner) -> Self {
        Self { runner }
    }

    pub fn runner(&self) -> &JobRunner {
        &self.runner
    }

    /// Convert all inputs in `source_dir` into its output subfolder.
    ///
    /// Never recurses. A failed file does not stop the batch; only listing
    /// errors and fatal transcoder errors are returned.
    pub async fn scan_and_convert(&self, source_dir: &Path) -> Result<BatchReport, ScanError> {
        let config = self.runner.config();
        let output_dir = config.output_dir_for(source_dir);

        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|source| ScanError::OutputDir {
                path: output_dir.clone(),
                source,
            })?;

        tracing::info!("Searching for input files in: {}", source_dir.display());

        let inputs = find_inputs(source_dir, config)
            .await
            .map_err(|source| ScanError::Listing {
                path: source_dir.to_path_buf(),
                source,
            })?;

        let mut report = BatchReport {
            found: inputs.len(),
            ..Default::default()
        };

        for input in &inputs {
            let outcome = self.runner.convert(input, &output_dir).await?;
            report.record(outcome);
        }

        tracing::info!(
            "------ Finished batch conversion for: {} ({} converted, {} skipped, {} failed) ------",
            source_dir.display(),
            report.converted,
            report.skipped,
            report.failed
        );

        Ok(report)
    }
}

/// List regular files directly inside `dir` whose names match the input
/// pattern. Order follows the directory listing and is not significant.
pub async fn find_inputs(dir: &Path, config: &Config) -> std::io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();

        if !config.matches_input(&path) {
            continue;
        }

        // Follows symlinks, so a linked clip still counts as a file
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(_) => continue,
        };

        if metadata.is_file() {
            inputs.push(path);
        }
    }

    Ok(inputs)
}
