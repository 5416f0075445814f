//! Filesystem-driven ingestion.
//!
//! The pipeline:
//!
//! 1. **Source**: notify watcher translated into created/modified events
//! 2. **Handler**: decides whether an event should trigger a batch pass
//! 3. **Monitor**: single loop draining events until interrupted
//!
//! ```text
//! notify thread → mpsc (bounded) → Monitor loop → EventHandler → BatchScanner
//! ```

pub mod handler;
pub mod monitor;
pub mod source;

// Re-export key types
pub use handler::EventHandler;
pub use monitor::{Monitor, MonitorState};
pub use source::{translate, EventSource, WatchError, EVENT_CHANNEL_CAPACITY};
