//! Monitor Integration Tests
//!
//! Tests for the fixed-folder and new-subfolder monitors, driven through an
//! in-memory event channel unless stated otherwise.

mod common;

use std::sync::Arc;
use std::time::Duration;

use autoconvert::ingest::{EventHandler, Monitor, MonitorState};
use autoconvert::{FsEvent, WatchTarget};
use common::{scanner_for, test_config, RecordingTranscoder};
use tempfile::TempDir;
use tokio::fs;
use tokio::sync::mpsc;

#[tokio::test]
async fn test_fixed_monitor_start_creates_dir_and_scans() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path().join("Desktop").join("drop");

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(&watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(&watch), scanner);

    assert_eq!(monitor.state(), MonitorState::Starting);
    assert_eq!(
        monitor.handler(),
        &EventHandler::ScanOnInput {
            watch_dir: watch.clone()
        }
    );

    monitor.start().await.unwrap();
    assert!(watch.is_dir());
    assert!(watch.join("convertedVideos").is_dir());

    // Files present before startup are picked up by the initial pass
    let temp2 = TempDir::new().unwrap();
    fs::write(temp2.path().join("early.mp4"), b"x").await.unwrap();
    let transcoder2 = Arc::new(RecordingTranscoder::new());
    let scanner2 = scanner_for(test_config(temp2.path()), transcoder2.clone());
    let mut monitor2 = Monitor::new(WatchTarget::fixed_folder(temp2.path()), scanner2);
    monitor2.start().await.unwrap();
    assert_eq!(transcoder2.called_names(), vec!["early.mp4"]);
}

#[tokio::test]
async fn test_fixed_monitor_reacts_to_input_files_only() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path();

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(watch), scanner);
    monitor.start().await.unwrap();

    let (tx, rx) = mpsc::channel(16);

    fs::write(watch.join("arrived.mp4"), b"x").await.unwrap();
    fs::write(watch.join("notes.txt"), b"x").await.unwrap();

    tx.send(FsEvent::dir_created(watch.join("convertedVideos"))).await.unwrap();
    tx.send(FsEvent::file_modified(watch.join("notes.txt"))).await.unwrap();
    tx.send(FsEvent::file_created(watch.join("arrived.mp4"))).await.unwrap();
    tx.send(FsEvent::file_modified(watch.join("arrived.mp4"))).await.unwrap();
    drop(tx);

    monitor.run(rx, std::future::pending()).await.unwrap();

    // Two accepted events, two full passes, but only one conversion
    assert_eq!(monitor.handled(), 2);
    assert_eq!(transcoder.called_names(), vec!["arrived.mp4"]);
    assert!(watch.join("convertedVideos").join("arrived.mov").is_file());
    assert_eq!(monitor.state(), MonitorState::Stopped);
}

#[tokio::test]
async fn test_event_triggers_full_directory_pass() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path();

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(watch), scanner);
    monitor.start().await.unwrap();

    // Both files land, only one event is delivered
    fs::write(watch.join("first.mp4"), b"x").await.unwrap();
    fs::write(watch.join("second.mp4"), b"x").await.unwrap();

    let (tx, rx) = mpsc::channel(4);
    tx.send(FsEvent::file_created(watch.join("first.mp4"))).await.unwrap();
    drop(tx);

    monitor.run(rx, std::future::pending()).await.unwrap();

    assert_eq!(transcoder.called_names(), vec!["first.mp4", "second.mp4"]);
}

#[tokio::test]
async fn test_shutdown_waits_for_in_flight_scan() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path();

    let transcoder =
        Arc::new(RecordingTranscoder::new().with_delay(Duration::from_millis(300)));
    let scanner = scanner_for(test_config(watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(watch), scanner);
    monitor.start().await.unwrap();

    fs::write(watch.join("long.mp4"), b"x").await.unwrap();

    let (tx, rx) = mpsc::channel(4);
    tx.send(FsEvent::file_created(watch.join("long.mp4"))).await.unwrap();

    let shutdown = tokio::time::sleep(Duration::from_millis(50));
    monitor.run(rx, shutdown).await.unwrap();

    // Interrupt arrived mid-conversion; the conversion still finished
    assert_eq!(monitor.handled(), 1);
    assert!(watch.join("convertedVideos").join("long.mov").is_file());
    assert_eq!(monitor.state(), MonitorState::Stopped);

    // Sender sees the loop is gone
    assert!(tx.send(FsEvent::file_created(watch.join("late.mp4"))).await.is_err());
}

#[tokio::test]
async fn test_missing_transcoder_stops_monitor() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path();

    let transcoder = Arc::new(RecordingTranscoder::missing_binary());
    let scanner = scanner_for(test_config(watch), transcoder);
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(watch), scanner);
    monitor.start().await.unwrap();

    fs::write(watch.join("a.mp4"), b"x").await.unwrap();
    let (tx, rx) = mpsc::channel(4);
    tx.send(FsEvent::file_created(watch.join("a.mp4"))).await.unwrap();

    let result = monitor.run(rx, std::future::pending()).await;
    assert!(result.is_err());
    assert_eq!(monitor.state(), MonitorState::Stopped);
}

#[tokio::test]
async fn test_subfolder_monitor_scans_new_directories() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(root), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::script_folder(root), scanner);

    assert_eq!(
        monitor.handler(),
        &EventHandler::ScanNewSubfolder {
            settle_delay: Duration::from_millis(20)
        }
    );

    // No initial pass over the script folder itself
    fs::write(root.join("loose.mp4"), b"x").await.unwrap();
    monitor.start().await.unwrap();
    assert!(!root.join("convertedVideos").exists());

    let shoot = root.join("GrobVideos");
    fs::create_dir(&shoot).await.unwrap();
    fs::write(shoot.join("take1.mp4"), b"x").await.unwrap();
    fs::write(shoot.join("take2.mp4"), b"x").await.unwrap();

    let (tx, rx) = mpsc::channel(16);
    tx.send(FsEvent::file_created(root.join("loose.mp4"))).await.unwrap();
    tx.send(FsEvent::new(&shoot, true, autoconvert::domain::FsEventKind::Modified))
        .await
        .unwrap();
    tx.send(FsEvent::dir_created(root.join("vanished"))).await.unwrap();
    tx.send(FsEvent::dir_created(&shoot)).await.unwrap();
    drop(tx);

    monitor.run(rx, std::future::pending()).await.unwrap();

    assert_eq!(monitor.handled(), 1);
    assert_eq!(transcoder.called_names(), vec!["take1.mp4", "take2.mp4"]);
    assert!(shoot.join("convertedVideos").join("take1.mov").is_file());
    assert!(shoot.join("convertedVideos").join("take2.mov").is_file());
    assert!(!root.join("convertedVideos").exists());
}

#[tokio::test]
async fn test_subfolder_monitor_waits_for_settle_delay() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let mut config = test_config(root);
    config.settle_delay = Duration::from_millis(200);
    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(config, transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::script_folder(root), scanner);

    let shoot = root.join("copying");
    fs::create_dir(&shoot).await.unwrap();

    let (tx, rx) = mpsc::channel(4);
    tx.send(FsEvent::dir_created(&shoot)).await.unwrap();
    drop(tx);

    // The file finishes "copying" while the monitor is still settling
    let copier = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        fs::write(shoot.join("late.mp4"), b"x").await.unwrap();
    };

    let (result, _) = tokio::join!(monitor.run(rx, std::future::pending()), copier);
    result.unwrap();

    assert_eq!(transcoder.called_names(), vec!["late.mp4"]);
}

#[tokio::test]
async fn test_watch_until_converts_dropped_file() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path().join("drop");

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(&watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(&watch), scanner);

    let output = watch.join("convertedVideos").join("dropped.mov");
    let input = watch.join("dropped.mp4");

    let dropper = async {
        // Give the monitor time to create the folder and subscribe
        tokio::time::sleep(Duration::from_millis(500)).await;
        fs::write(&input, b"x").await.unwrap();
    };

    let shutdown = async {
        for _ in 0..200 {
            if output.is_file() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    };

    let (result, _) = tokio::join!(monitor.watch_until(shutdown), dropper);
    result.unwrap();

    assert!(output.is_file());
    assert_eq!(transcoder.called_names(), vec!["dropped.mp4"]);
}

#[tokio::test]
async fn test_interrupt_during_startup_pass_finishes_it() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path();
    fs::write(watch.join("early.mp4"), b"x").await.unwrap();

    let transcoder =
        Arc::new(RecordingTranscoder::new().with_delay(Duration::from_millis(200)));
    let scanner = scanner_for(test_config(watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(watch), scanner);

    // Interrupt is already pending when the startup pass begins
    monitor.watch_until(std::future::ready(())).await.unwrap();

    assert_eq!(transcoder.called_names(), vec!["early.mp4"]);
    assert!(watch.join("convertedVideos").join("early.mov").is_file());
    assert_eq!(monitor.handled(), 0);
    assert_eq!(monitor.state(), MonitorState::Stopped);
}

#[tokio::test]
async fn test_file_arriving_during_startup_pass_is_converted() {
    let temp = TempDir::new().unwrap();
    let watch = temp.path().to_path_buf();
    fs::write(watch.join("early.mp4"), b"x").await.unwrap();

    let transcoder =
        Arc::new(RecordingTranscoder::new().with_delay(Duration::from_millis(500)));
    let scanner = scanner_for(test_config(&watch), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::fixed_folder(&watch), scanner);

    let late_output = watch.join("convertedVideos").join("late.mov");

    // Lands after the startup listing, while early.mp4 is still converting
    let dropper = async {
        tokio::time::sleep(Duration::from_millis(150)).await;
        fs::write(watch.join("late.mp4"), b"x").await.unwrap();
    };

    let shutdown = async {
        for _ in 0..200 {
            if late_output.is_file() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
    };

    let (result, _) = tokio::join!(monitor.watch_until(shutdown), dropper);
    result.unwrap();

    assert!(late_output.is_file());
    assert_eq!(transcoder.called_names(), vec!["early.mp4", "late.mp4"]);
}

#[tokio::test]
async fn test_subfolder_monitor_accepts_untyped_rename() {
    use notify::event::{ModifyKind, RenameMode};
    use notify::EventKind;

    let temp = TempDir::new().unwrap();
    let root = temp.path();

    let transcoder = Arc::new(RecordingTranscoder::new());
    let scanner = scanner_for(test_config(root), transcoder.clone());
    let mut monitor = Monitor::new(WatchTarget::script_folder(root), scanner);

    let moved = root.join("GrobVideos");
    fs::create_dir(&moved).await.unwrap();
    fs::write(moved.join("clip.mp4"), b"x").await.unwrap();

    // How FSEvents reports a folder dragged into the directory
    let raw = notify::Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Any)))
        .add_path(moved.clone());

    let (tx, rx) = mpsc::channel(4);
    for event in autoconvert::ingest::translate(&raw) {
        tx.send(event).await.unwrap();
    }
    drop(tx);

    monitor.run(rx, std::future::pending()).await.unwrap();

    assert_eq!(monitor.handled(), 1);
    assert!(moved.join("convertedVideos").join("clip.mov").is_file());
}
