/*!
 * Integration tests for application lifecycle
 */

use std::fs;
use anyhow::Result;
use srtdigest::app_config::Config;
use srtdigest::app_controller::{Controller, FolderSummary, RunOptions};
use srtdigest::AppError;
use crate::common;

/// Test the controller initialization with default config
#[test]
fn test_controller_initialization_withDefaultConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(Config::default())?;
    assert_eq!(controller.config().key_moments, 5);
    Ok(())
}

/// Test that an invalid config is rejected up front
#[test]
fn test_controller_initialization_withInvalidConfig_shouldFail() {
    let config = Config {
        key_moments: 0,
        ..Config::default()
    };
    let result = Controller::with_config(config);
    assert!(matches!(result, Err(AppError::Config(_))));
}

/// Test the plain overview for a single file
#[test]
fn test_run_withSingleFile_shouldPrintOverview() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "talk.srt")?;
    let controller = Controller::with_config(Config::default())?;

    let mut out = Vec::new();
    controller.run(&srt, RunOptions::default(), &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains("Duration: 7.0 s"));
    assert!(text.contains("Words: 4"));
    assert!(text.contains("Entries: 2"));
    assert!(text.contains("Hello world\nSecond line"));
    assert!(!text.contains("Found video file"));
    assert!(!text.contains("No matching video file"));
    assert!(!text.contains("full_text"));
    Ok(())
}

/// Test JSON output and media lookup together
#[test]
fn test_run_withJsonAndFindVideo_shouldIncludeRecordAndVideo() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "talk.srt")?;
    let video = common::create_test_file(temp_dir.path(), "talk.mp4", "")?;
    let controller = Controller::with_config(Config::default())?;

    let mut out = Vec::new();
    let options = RunOptions { json: true, find_video: true };
    controller.run(&srt, options, &mut out)?;
    let text = String::from_utf8(out)?;

    assert!(text.contains(&format!("Found video file: {}", video.display())));

    let (_, json) = text.split_once(&"=".repeat(50)).expect("separator present");
    let value: serde_json::Value = serde_json::from_str(json.trim())?;
    assert_eq!(value["duration_ms"], 7000);
    assert_eq!(value["word_count"], 4);
    assert_eq!(value["files"]["video"], video.display().to_string());
    assert_eq!(value["key_moments"].as_array().map(Vec::len), Some(2));
    Ok(())
}

/// Test the missing-video message
#[test]
fn test_run_withFindVideoAndNoVideo_shouldReportMissing() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let srt = common::create_test_subtitle(temp_dir.path(), "talk.srt")?;
    let controller = Controller::with_config(Config::default())?;

    let mut out = Vec::new();
    controller.run(&srt, RunOptions { json: false, find_video: true }, &mut out)?;
    assert!(String::from_utf8(out)?.contains("No matching video file found"));
    Ok(())
}

/// Test that unparsable and missing inputs fail
#[test]
fn test_run_withBadInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let prose = common::create_test_file(temp_dir.path(), "prose.srt", "No subtitles here.\n")?;
    let controller = Controller::with_config(Config::default())?;

    let mut out = Vec::new();
    let err = controller.run(&prose, RunOptions::default(), &mut out).unwrap_err();
    assert!(err.to_string().contains("No parsable subtitle content"));

    let err = controller
        .run(&temp_dir.path().join("missing.srt"), RunOptions::default(), &mut out)
        .unwrap_err();
    assert!(err.to_string().contains("does not exist"));
    Ok(())
}

/// Test folder mode keeps going past a broken file
#[test]
fn test_run_folder_withOneBrokenFile_shouldProcessTheRest() -> Result<()> {
    common::init_logging();
    let temp_dir = common::create_temp_dir()?;
    common::create_test_subtitle(temp_dir.path(), "a.srt")?;
    common::create_test_file(temp_dir.path(), "b.srt", "garbage\n\nmore garbage")?;
    let nested = temp_dir.path().join("extras");
    fs::create_dir(&nested)?;
    common::create_test_file(&nested, "c.srt", &common::generate_srt(3))?;

    let controller = Controller::with_config(Config::default())?;
    let mut out = Vec::new();
    let summary = controller.run_folder(temp_dir.path(), RunOptions::default(), &mut out)?;

    assert_eq!(summary, FolderSummary { processed: 2, failed: 1 });
    let text = String::from_utf8(out)?;
    assert!(text.contains("a.srt"));
    assert!(text.contains("c.srt"));
    Ok(())
}

/// Test folder mode fails when nothing can be parsed
#[test]
fn test_run_folder_withOnlyBrokenFiles_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.srt", "nothing")?;

    let controller = Controller::with_config(Config::default())?;
    let mut out = Vec::new();
    assert!(controller.run_folder(temp_dir.path(), RunOptions::default(), &mut out).is_err());

    let empty_dir = common::create_temp_dir()?;
    assert!(controller.run(empty_dir.path(), RunOptions::default(), &mut out).is_err());
    Ok(())
}
