//! One-shot batch conversion (Mode 2).

use std::path::Path;

use anyhow::Result;

use crate::core::{BatchReport, BatchScanner};

/// Convert every input in `dir` once.
///
/// Fails without touching anything if `dir` is not an existing directory.
pub async fn execute(scanner: &BatchScanner, dir: &Path) -> Result<BatchReport> {
    if !dir.is_dir() {
        anyhow::bail!("'{}' is not a valid directory", dir.display());
    }

    let report = scanner.scan_and_convert(dir).await?;

    if report.found == 0 {
        tracing::info!("No input files found in {}", dir.display());
    }

    Ok(report)
}
