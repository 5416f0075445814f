//! Directory monitors (Mode 1 and Mode 3).
//!
//! A monitor owns one [`WatchTarget`]. Events from the [`EventSource`] are
//! drained by a single loop, so at most one batch pass (and therefore one
//! transcode) runs at a time. On shutdown the loop stops taking events but
//! any in-flight pass runs to completion first.

use std::future::Future;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use super::handler::EventHandler;
use super::source::EventSource;
use crate::core::BatchScanner;
use crate::domain::{FsEvent, WatchMode, WatchTarget};

/// Lifecycle of a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Starting,
    Watching,
    Stopped,
}

/// Watches one directory and feeds events to its handler
pub struct Monitor {
    target: WatchTarget,
    handler: EventHandler,
    scanner: BatchScanner,
    state: MonitorState,
    handled: usize,
}

impl Monitor {
    /// Build a monitor whose handler follows the target's mode
    pub fn new(target: WatchTarget, scanner: BatchScanner) -> Self {
        let handler = match target.mode {
            WatchMode::FixedFolder => EventHandler::ScanOnInput {
                watch_dir: target.path.clone(),
            },
            WatchMode::ScriptFolder => EventHandler::ScanNewSubfolder {
                settle_delay: scanner.runner().config().settle_delay,
            },
        };

        Self {
            target,
            handler,
            scanner,
            state: MonitorState::Starting,
            handled: 0,
        }
    }

    pub fn handler(&self) -> &EventHandler {
        &self.handler
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Number of events that led to a batch pass
    pub fn handled(&self) -> usize {
        self.handled
    }

    /// Starting phase.
    ///
    /// The fixed folder is created if missing and scanned once so files
    /// dropped while the process was down are not missed. The script folder
    /// is never a source of inputs itself, so it gets no initial pass.
    pub async fn start(&mut self) -> Result<()> {
        self.prepare().await?;
        self.initial_pass().await
    }

    async fn prepare(&mut self) -> Result<()> {
        self.state = MonitorState::Starting;

        if self.target.mode == WatchMode::FixedFolder {
            tokio::fs::create_dir_all(&self.target.path)
                .await
                .with_context(|| {
                    format!("Failed to create watch directory {}", self.target.path.display())
                })?;
        }

        Ok(())
    }

    async fn initial_pass(&mut self) -> Result<()> {
        if self.target.mode == WatchMode::FixedFolder {
            self.scanner.scan_and_convert(&self.target.path).await?;
        }

        tracing::info!(
            "=== ({}) Monitoring folder: {} ===",
            self.target.mode,
            self.target.path.display()
        );
        if self.target.mode == WatchMode::ScriptFolder {
            tracing::info!(
                "    Paste a folder with .mp4 files here and it will be converted automatically."
            );
        }

        Ok(())
    }

    /// Start, subscribe to filesystem events and process them until
    /// `shutdown` resolves.
    ///
    /// The subscription is opened before the initial pass, so files landing
    /// during that pass are queued rather than missed. `shutdown` is polled
    /// from the start; if it fires during the initial pass, that pass still
    /// runs to completion and the monitor then stops without watching.
    pub async fn watch_until<S>(&mut self, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        self.prepare().await?;

        let (source, events) = EventSource::watch(&self.target.path)
            .with_context(|| format!("Failed to watch {}", self.target.path.display()))?;

        let mut stop_requested = false;
        {
            let initial = self.initial_pass();
            tokio::pin!(initial);

            loop {
                tokio::select! {
                    result = &mut initial => {
                        result?;
                        break;
                    }
                    _ = &mut shutdown, if !stop_requested => {
                        tracing::info!("Interrupt received, finishing the current pass...");
                        stop_requested = true;
                    }
                }
            }
        }

        if stop_requested {
            tracing::info!("Stopping monitor...");
            self.state = MonitorState::Stopped;
            drop(source);
            return Ok(());
        }

        let result = self.run(events, shutdown.as_mut()).await;
        drop(source);
        result
    }

    /// Watching phase: drain `events` one at a time until `shutdown`
    /// resolves or the event source closes.
    pub async fn run<S>(&mut self, mut events: mpsc::Receiver<FsEvent>, shutdown: S) -> Result<()>
    where
        S: Future<Output = ()>,
    {
        self.state = MonitorState::Watching;
        tokio::pin!(shutdown);

        let result = loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => {
                    tracing::info!("Stopping monitor...");
                    break Ok(());
                }

                maybe_event = events.recv() => match maybe_event {
                    Some(event) => {
                        if let Err(e) = self.dispatch(&event).await {
                            break Err(e);
                        }
                    }
                    None => {
                        tracing::warn!("Event source closed");
                        break Ok(());
                    }
                },
            }
        };

        events.close();
        self.state = MonitorState::Stopped;
        result
    }

    async fn dispatch(&mut self, event: &FsEvent) -> Result<()> {
        match self.handler.handle(event, &self.scanner).await {
            Ok(Some(_)) => {
                self.handled += 1;
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                tracing::warn!("Batch pass failed: {}", e);
                Ok(())
            }
        }
    }
}
