/*!
 * # srtdigest - SRT subtitle parsing and content digests
 *
 * A Rust library that turns SRT subtitle files into a structured document
 * and derives summary artifacts from it.
 *
 * ## Features
 *
 * - Tolerant SRT parsing: malformed blocks are skipped, only a file with no
 *   usable entry is an error
 * - Inline markup stripping (`<i>`, `<b>`, `<font ...>`)
 * - Derived full text, word count and total duration
 * - Word-bounded summaries and evenly spaced key moments
 * - Lookup of the media file that accompanies a subtitle file
 * - JSON records for downstream tools
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `subtitle_processor`: block splitting, entry parsing and the `SubtitleDocument` aggregate
 * - `report`: JSON record and console overview
 * - `file_utils`: file reading, media file lookup, directory scans
 * - `app_config`: Configuration management
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod report;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, RunOptions};
pub use errors::{AppError, SubtitleError};
pub use report::DocumentReport;
pub use subtitle_processor::{SubtitleDocument, SubtitleEntry, Timestamp};
