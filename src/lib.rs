//! autoconvert - folder-watching video converter
//!
//! Watches filesystem locations for newly arrived `.mp4` files and converts
//! them to `.mov` (half resolution, PCM audio) by delegating to `ffmpeg`.
//!
//! # Architecture
//!
//! Everything funnels into one idempotent routine:
//! - A conversion is skipped whenever its output file already exists
//! - A batch pass converts every matching file directly in a directory
//! - Monitors turn filesystem events into batch passes, one at a time
//!
//! # Modules
//!
//! - `adapters`: External transcoder (ffmpeg)
//! - `core`: Job runner and batch scanner
//! - `domain`: Data structures (ConversionJob, EncodingProfile, FsEvent)
//! - `ingest`: Event source and directory monitors
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Monitor ~/Desktop/DAVINCI RESOLVE/AutomaticConvertMp4ToMov
//! autoconvert
//!
//! # Convert a folder once
//! autoconvert ~/footage/day1
//!
//! # Monitor the program's folder for new subfolders
//! autoconvert --monitor-script-dir
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod ingest;

// Re-export main types at crate root for convenience
pub use adapters::{FfmpegTranscoder, Transcoder, TranscoderError};
pub use config::Config;
pub use crate::core::{BatchReport, BatchScanner, JobRunner};
pub use domain::{ConversionJob, ConversionOutcome, EncodingProfile, FsEvent, WatchTarget};
pub use ingest::{EventHandler, Monitor};
