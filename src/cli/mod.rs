//! Command-line interface for autoconvert.
//!
//! Three invocation shapes, one per operating mode:
//! - `autoconvert` - monitor the fixed drop folder (Mode 1)
//! - `autoconvert <DIR>` - convert everything in `<DIR>` once and exit (Mode 2)
//! - `autoconvert --monitor-script-dir` - monitor the program's own folder
//!   for new subfolders (Mode 3)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::adapters::FfmpegTranscoder;
use crate::config::{paths, Config};
use crate::core::{BatchScanner, JobRunner};
use crate::domain::WatchTarget;
use crate::ingest::Monitor;

pub mod batch;

const USAGE_EXAMPLES: &str = "\
Usage:
  autoconvert                        # Mode 1 (monitor default folder)
  autoconvert <DIR>                  # Mode 2 (batch convert all .mp4 in <DIR>)
  autoconvert --monitor-script-dir   # Mode 3 (monitor program folder)";

/// autoconvert - convert incoming .mp4 videos to .mov with ffmpeg
#[derive(Parser, Debug)]
#[command(name = "autoconvert")]
#[command(author, version, about, long_about = None, after_help = USAGE_EXAMPLES)]
pub struct Cli {
    /// Directory to batch convert once, then exit
    #[arg(conflicts_with = "monitor_script_dir")]
    pub directory: Option<PathBuf>,

    /// Watch the program's own folder for newly added subfolders
    #[arg(long)]
    pub monitor_script_dir: bool,
}

/// Operating mode selected by the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// Mode 1
    MonitorFixed,

    /// Mode 2
    Batch(PathBuf),

    /// Mode 3
    MonitorScriptDir,
}

impl Cli {
    pub fn mode(&self) -> RunMode {
        match (&self.directory, self.monitor_script_dir) {
            (_, true) => RunMode::MonitorScriptDir,
            (Some(dir), false) => RunMode::Batch(dir.clone()),
            (None, false) => RunMode::MonitorFixed,
        }
    }

    /// Execute the selected mode
    pub async fn execute(self) -> Result<()> {
        let config = Arc::new(Config::from_env()?);
        let transcoder = Arc::new(FfmpegTranscoder::with_binary_path(
            config.transcoder_binary.clone(),
        ));
        let scanner = BatchScanner::new(JobRunner::new(config.clone(), transcoder));

        match self.mode() {
            RunMode::MonitorFixed => {
                let target = WatchTarget::fixed_folder(config.watch_dir.clone());
                Monitor::new(target, scanner).watch_until(shutdown_signal()).await
            }
            RunMode::Batch(dir) => batch::execute(&scanner, &dir).await.map(|_| ()),
            RunMode::MonitorScriptDir => {
                let target = WatchTarget::script_folder(paths::script_dir()?);
                Monitor::new(target, scanner).watch_until(shutdown_signal()).await
            }
        }
    }
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
