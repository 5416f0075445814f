//! Domain types for autoconvert.
//!
//! This module contains the plain data structures:
//! - Job: Input file + output directory, and the outcome of converting it
//! - Profile: Fixed encoding parameters
//! - Events: Filesystem changes delivered to the monitors
//! - Target: Watched directories

pub mod events;
pub mod job;
pub mod profile;
pub mod target;

// Re-export commonly used types
pub use events::{FsEvent, FsEventKind};
pub use job::{output_path_for, ConversionJob, ConversionOutcome};
pub use profile::EncodingProfile;
pub use target::{WatchMode, WatchTarget};
