//! ffmpeg transcoder adapter.
//!
//! Runs `ffmpeg` as a child process with inherited stdio so its own
//! progress stats and warnings pass straight through to the terminal.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::{TranscodeStatus, Transcoder, TranscoderError};
use crate::domain::EncodingProfile;

/// ffmpeg adapter using subprocess mode
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    /// Path to the ffmpeg binary (default: "ffmpeg")
    binary_path: String,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FfmpegTranscoder {
    /// Create an adapter resolving `ffmpeg` on PATH
    pub fn new() -> Self {
        Self::with_binary_path("ffmpeg")
    }

    /// Create an adapter with a custom binary path
    pub fn with_binary_path(binary_path: impl Into<String>) -> Self {
        Self {
            binary_path: binary_path.into(),
        }
    }

    pub fn binary_path(&self) -> &str {
        &self.binary_path
    }

    /// Full argument list for one conversion.
    ///
    /// Non-interactive, overwrites without prompting, only warnings plus
    /// progress stats on the console.
    pub fn build_args(input: &Path, output: &Path, profile: &EncodingProfile) -> Vec<OsString> {
        let mut args: Vec<OsString> = ["-y", "-hide_banner", "-loglevel", "warning", "-stats", "-i"]
            .into_iter()
            .map(OsString::from)
            .collect();
        args.push(input.as_os_str().to_os_string());

        let mut push = |flag: &str, value: String| {
            args.push(flag.into());
            args.push(value.into());
        };
        push("-vf", profile.scale_filter());
        push("-vcodec", profile.video_codec.clone());
        push("-preset", profile.preset.clone());
        push("-crf", profile.crf.to_string());
        push("-acodec", profile.audio_codec.clone());
        push("-ar", profile.audio_sample_rate.to_string());
        push("-ac", profile.audio_channels.to_string());
        if profile.faststart {
            push("-movflags", "+faststart".to_string());
        }

        args.push(output.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn transcode(
        &self,
        input: &Path,
        output: &Path,
        profile: &EncodingProfile,
    ) -> Result<TranscodeStatus, TranscoderError> {
        let status = Command::new(&self.binary_path)
            .args(Self::build_args(input, output, profile))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => TranscoderError::NotFound(self.binary_path.clone()),
                _ => TranscoderError::Spawn {
                    path: input.to_path_buf(),
                    source: e,
                },
            })?;

        Ok(TranscodeStatus {
            exit_code: status.code(),
        })
    }
}
