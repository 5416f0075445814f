//! Filesystem events consumed by the monitors.
//!
//! Events are transient: each one is handled once by a monitor loop and
//! then dropped.

use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// The kinds of change a monitor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsEventKind {
    Created,
    Modified,
}

/// A single path-level change reported by the event source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsEvent {
    /// Path that changed
    pub path: PathBuf,

    /// Whether the path is a directory
    pub is_directory: bool,

    /// Type of change
    pub kind: FsEventKind,

    /// When the event source observed the change
    pub observed_at: DateTime<Utc>,
}

impl FsEvent {
    /// Create an event stamped with the current time
    pub fn new(path: impl Into<PathBuf>, is_directory: bool, kind: FsEventKind) -> Self {
        Self {
            path: path.into(),
            is_directory,
            kind,
            observed_at: Utc::now(),
        }
    }

    pub fn file_created(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false, FsEventKind::Created)
    }

    pub fn file_modified(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false, FsEventKind::Modified)
    }

    pub fn dir_created(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true, FsEventKind::Created)
    }
}
