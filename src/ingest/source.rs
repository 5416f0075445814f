//! Filesystem event source.
//!
//! Wraps a non-recursive `notify` watcher and pushes translated
//! [`FsEvent`]s into a bounded channel. The notify callback runs on the
//! watcher's own thread; the receiving end is drained by a single monitor
//! loop, which is what serialises event handling.

use std::path::{Path, PathBuf};

use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::{FsEvent, FsEventKind};

/// Capacity of the event channel between notify and the monitor loop
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Errors that can occur setting up a watch
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("Watch directory does not exist: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

/// Live subscription to a directory. Dropping it stops event delivery.
pub struct EventSource {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl EventSource {
    /// Start watching `dir` (non-recursive)
    pub fn watch(dir: &Path) -> Result<(Self, mpsc::Receiver<FsEvent>), WatchError> {
        if !dir.is_dir() {
            return Err(WatchError::DirectoryNotFound(dir.to_path_buf()));
        }

        let (tx, rx) = mpsc::channel::<FsEvent>(EVENT_CHANNEL_CAPACITY);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<notify::Event>| match res {
                Ok(event) => {
                    for fs_event in translate(&event) {
                        // Receiver gone means the monitor has stopped
                        if tx.blocking_send(fs_event).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => tracing::warn!("Watcher error: {:?}", e),
            },
            notify::Config::default(),
        )?;

        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        tracing::debug!("Subscribed to filesystem events in {}", dir.display());

        Ok((
            Self {
                path: dir.to_path_buf(),
                _watcher: watcher,
            },
            rx,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Translate a notify event into the created/modified events monitors use.
///
/// A rename into the directory counts as a creation, so folders moved in
/// (rather than copied) are picked up too. Backends that cannot tell the two
/// ends of a rename apart (FSEvents reports `Name(Any)`) only yield paths
/// that still exist. Removals and access events are dropped.
pub fn translate(event: &notify::Event) -> Vec<FsEvent> {
    if let EventKind::Modify(ModifyKind::Name(RenameMode::Any | RenameMode::Both | RenameMode::Other)) =
        event.kind
    {
        return event
            .paths
            .iter()
            .filter(|path| path.exists())
            .map(|path| FsEvent::new(path.clone(), path.is_dir(), FsEventKind::Created))
            .collect();
    }

    let (kind, dir_hint) = match event.kind {
        EventKind::Create(CreateKind::Folder) => (FsEventKind::Created, Some(true)),
        EventKind::Create(CreateKind::File) => (FsEventKind::Created, Some(false)),
        EventKind::Create(_) => (FsEventKind::Created, None),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => (FsEventKind::Created, None),
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => return Vec::new(),
        EventKind::Modify(_) => (FsEventKind::Modified, None),
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .map(|path| {
            let is_directory = dir_hint.unwrap_or_else(|| path.is_dir());
            FsEvent::new(path.clone(), is_directory, kind)
        })
        .collect()
}
