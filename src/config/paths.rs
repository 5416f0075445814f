//! Canonical paths and names for autoconvert.
//!
//! Single source of truth - import this instead of hardcoding paths.
//!
//! | Location | Mode | Purpose |
//! |----------|------|---------|
//! | `default_monitor_dir()` | 1 | Drop folder for loose .mp4 files |
//! | `script_dir()` | 3 | Folder receiving whole directories of clips |
//! | `OUTPUT_FOLDER` | all | Subfolder of each source holding outputs |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the subfolder created inside every source directory
pub const OUTPUT_FOLDER: &str = "convertedVideos";

/// Glob matched against file names of candidate inputs
pub const INPUT_PATTERN: &str = "*.mp4";

/// Extension given to converted files
pub const OUTPUT_EXTENSION: &str = "mov";

/// Overrides the Mode 1 watch directory
pub const ENV_WATCH_DIR: &str = "AUTOCONVERT_WATCH_DIR";

/// Overrides the transcoder binary
pub const ENV_FFMPEG_PATH: &str = "FFMPEG_PATH";

/// Mode 1 watch directory beneath a given home directory
pub fn monitor_dir_in(home: &Path) -> PathBuf {
    home.join("Desktop")
        .join("DAVINCI RESOLVE")
        .join("AutomaticConvertMp4ToMov")
}

/// Default Mode 1 watch directory (~/Desktop/DAVINCI RESOLVE/AutomaticConvertMp4ToMov),
/// `None` when the home directory cannot be determined
pub fn default_monitor_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| monitor_dir_in(&home))
}

/// Directory containing the running executable (Mode 3 watch directory)
pub fn script_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable has no parent directory: {}", exe.display()))
}
