//! Core conversion logic.
//!
//! This module contains:
//! - JobRunner: Converts one file, skipping it if the output exists
//! - BatchScanner: Finds every input in a directory and runs them in sequence

pub mod runner;
pub mod scanner;

// Re-export commonly used types
pub use runner::JobRunner;
pub use scanner::{find_inputs, BatchReport, BatchScanner, ScanError};
