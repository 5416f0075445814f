//! Runtime configuration for autoconvert.
//!
//! There is no config file. Every parameter is a fixed default, with two
//! environment overrides read once at startup:
//! 1. `AUTOCONVERT_WATCH_DIR` - Mode 1 watch directory
//! 2. `FFMPEG_PATH` - transcoder binary (defaults to `ffmpeg` on PATH)
//!
//! The resolved [`Config`] is immutable and passed explicitly to the job
//! runner, the batch scanner and the monitors.

pub mod paths;

use std::path::{Path, PathBuf};
use std::time::Duration;

use glob::{MatchOptions, Pattern};
use thiserror::Error;

use crate::domain::EncodingProfile;

/// Default wait before scanning a freshly created subfolder (Mode 3)
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(5);

/// Errors that can occur while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine home directory")]
    NoHomeDir,

    #[error("Invalid input pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// Resolved, immutable configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Encoding parameters for every conversion
    pub profile: EncodingProfile,

    /// File-name pattern selecting inputs
    pub input_pattern: Pattern,

    /// Extension of converted files (no leading dot)
    pub output_extension: String,

    /// Subfolder of each source directory receiving outputs
    pub output_folder: String,

    /// How long Mode 3 waits for a new subfolder to finish copying
    pub settle_delay: Duration,

    /// Transcoder binary, resolved on PATH when not absolute
    pub transcoder_binary: String,

    /// Mode 1 watch directory
    pub watch_dir: PathBuf,
}

impl Config {
    /// Defaults rooted at the given Mode 1 watch directory
    pub fn with_watch_dir(watch_dir: impl Into<PathBuf>) -> Self {
        Self {
            profile: EncodingProfile::default(),
            input_pattern: default_input_pattern(),
            output_extension: paths::OUTPUT_EXTENSION.to_string(),
            output_folder: paths::OUTPUT_FOLDER.to_string(),
            settle_delay: DEFAULT_SETTLE_DELAY,
            transcoder_binary: "ffmpeg".to_string(),
            watch_dir: watch_dir.into(),
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve environment variables
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let watch_dir = match non_empty(lookup(paths::ENV_WATCH_DIR)) {
            Some(dir) => PathBuf::from(dir),
            None => paths::default_monitor_dir().ok_or(ConfigError::NoHomeDir)?,
        };

        let mut config = Self::with_watch_dir(watch_dir);
        if let Some(binary) = non_empty(lookup(paths::ENV_FFMPEG_PATH)) {
            config.transcoder_binary = binary;
        }

        Ok(config)
    }

    /// Replace the input pattern (e.g. `*.mkv`)
    pub fn with_input_pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        self.input_pattern = Pattern::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// Output directory for a given source directory
    pub fn output_dir_for(&self, source_dir: &Path) -> PathBuf {
        source_dir.join(&self.output_folder)
    }

    /// Whether the file name of `path` matches the input pattern (case-insensitive)
    pub fn matches_input(&self, path: &Path) -> bool {
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };

        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| self.input_pattern.matches_with(name, options))
            .unwrap_or(false)
    }
}

fn default_input_pattern() -> Pattern {
    // INPUT_PATTERN is a plain `*.ext` literal; see test_input_pattern_constant_is_valid
    Pattern::new(paths::INPUT_PATTERN).unwrap_or_default()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
