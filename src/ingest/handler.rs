//! Event handlers for the two monitor modes.

use std::path::PathBuf;
use std::time::Duration;

use crate::core::{BatchReport, BatchScanner, ScanError};
use crate::domain::{FsEvent, FsEventKind};

/// What a monitor does with each filesystem event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventHandler {
    /// Mode 1: any created/modified input file triggers a full pass over
    /// `watch_dir`, not just the file that changed
    ScanOnInput { watch_dir: PathBuf },

    /// Mode 3: a newly created subdirectory is scanned once, after waiting
    /// `settle_delay` for the copy into it to finish
    ScanNewSubfolder { settle_delay: Duration },
}

impl EventHandler {
    /// Whether this handler reacts to `event` at all
    pub fn accepts(&self, event: &FsEvent, scanner: &BatchScanner) -> bool {
        match self {
            EventHandler::ScanOnInput { .. } => {
                !event.is_directory && scanner.runner().config().matches_input(&event.path)
            }
            EventHandler::ScanNewSubfolder { .. } => {
                event.is_directory && event.kind == FsEventKind::Created
            }
        }
    }

    /// Handle one event. Returns the batch report when a scan ran.
    pub async fn handle(
        &self,
        event: &FsEvent,
        scanner: &BatchScanner,
    ) -> Result<Option<BatchReport>, ScanError> {
        if !self.accepts(event, scanner) {
            tracing::debug!("Ignoring {:?} event for {}", event.kind, event.path.display());
            return Ok(None);
        }

        match self {
            EventHandler::ScanOnInput { watch_dir } => {
                let seen = event.observed_at.format("%H:%M:%S");
                match event.kind {
                    FsEventKind::Created => {
                        tracing::info!(">>> Event detected at {}: {}", seen, event.path.display())
                    }
                    FsEventKind::Modified => tracing::info!(
                        ">>> Modification detected at {}: {}",
                        seen,
                        event.path.display()
                    ),
                }
                scanner.scan_and_convert(watch_dir).await.map(Some)
            }
            EventHandler::ScanNewSubfolder { settle_delay } => {
                tracing::info!(
                    ">>> New directory detected at {}: {}",
                    event.observed_at.format("%H:%M:%S"),
                    event.path.display()
                );

                // Fixed wait, no acknowledgement that the copy has finished
                tokio::time::sleep(*settle_delay).await;

                if !event.path.is_dir() {
                    tracing::warn!(
                        "'{}' is not a valid directory anymore, skipping",
                        event.path.display()
                    );
                    return Ok(None);
                }

                scanner.scan_and_convert(&event.path).await.map(Some)
            }
        }
    }
}
