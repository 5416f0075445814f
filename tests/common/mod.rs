//! Shared test fixtures.

#![allow(dead_code)]

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use autoconvert::adapters::{TranscodeStatus, Transcoder, TranscoderError};
use autoconvert::{BatchScanner, Config, EncodingProfile, JobRunner};

/// Transcoder double that records every invocation.
///
/// Writes a placeholder output unless the input's file name is listed in
/// `failing`, in which case it exits non-zero without producing anything.
#[derive(Default)]
pub struct RecordingTranscoder {
    failing: HashSet<String>,
    missing_binary: bool,
    delay: Duration,
    calls: Mutex<Vec<PathBuf>>,
}

impl RecordingTranscoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(mut self, file_name: &str) -> Self {
        self.failing.insert(file_name.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn missing_binary() -> Self {
        Self {
            missing_binary: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .calls()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

#[async_trait]
impl Transcoder for RecordingTranscoder {
    fn name(&self) -> &str {
        "recording"
    }

    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        _profile: &EncodingProfile,
    ) -> Result<TranscodeStatus, TranscoderError> {
        if self.missing_binary {
            return Err(TranscoderError::NotFound("ffmpeg".to_string()));
        }

        self.calls.lock().unwrap().push(input.to_path_buf());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let name = input.file_name().unwrap().to_string_lossy().into_owned();
        if self.failing.contains(&name) {
            return Ok(TranscodeStatus { exit_code: Some(1) });
        }

        tokio::fs::write(output, b"converted").await.unwrap();
        Ok(TranscodeStatus::success())
    }
}

/// Config rooted at `root` with a short settle delay
pub fn test_config(root: &Path) -> Config {
    let mut config = Config::with_watch_dir(root);
    config.settle_delay = Duration::from_millis(20);
    config
}

pub fn scanner_for(config: Config, transcoder: Arc<RecordingTranscoder>) -> BatchScanner {
    BatchScanner::new(JobRunner::new(Arc::new(config), transcoder))
}
