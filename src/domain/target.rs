//! Directories watched for the lifetime of the process.

use std::fmt;
use std::path::PathBuf;

/// How a watched directory is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// Inputs are dropped straight into the directory (Mode 1)
    FixedFolder,

    /// Inputs arrive inside new subdirectories of the directory (Mode 3)
    ScriptFolder,
}

/// A directory plus the mode it is watched in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub path: PathBuf,
    pub mode: WatchMode,
}

impl WatchTarget {
    pub fn fixed_folder(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: WatchMode::FixedFolder,
        }
    }

    pub fn script_folder(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: WatchMode::ScriptFolder,
        }
    }
}

impl fmt::Display for WatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WatchMode::FixedFolder => write!(f, "Mode 1, fixed folder"),
            WatchMode::ScriptFolder => write!(f, "Mode 3, script folder"),
        }
    }
}
