use std::io::Write;
use std::path::Path;

use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};

use crate::app_config::Config;
use crate::errors::{AppError, SubtitleError};
use crate::file_utils::FileManager;
use crate::report::{self, DocumentReport};
use crate::subtitle_processor::SubtitleDocument;

// @module: Application controller for subtitle digests

/// Output switches chosen on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Append the JSON record after the overview
    pub json: bool,

    /// Look for a media file next to the subtitle file and report it
    pub find_video: bool,
}

/// Outcome of processing a directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FolderSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Process a single file or every subtitle file under a directory
    pub fn run<W: Write>(&self, input_path: &Path, options: RunOptions, out: &mut W) -> Result<()> {
        if input_path.is_file() {
            self.process_file(input_path, options, out)?;
            Ok(())
        } else if input_path.is_dir() {
            self.run_folder(input_path, options, out)?;
            Ok(())
        } else {
            Err(SubtitleError::SourceNotFound(input_path.to_path_buf()).into())
        }
    }

    /// Parse one subtitle file and write its overview (and JSON record) to `out`
    pub fn process_file<W: Write>(&self, path: &Path, options: RunOptions, out: &mut W) -> Result<(), AppError> {
        let document = SubtitleDocument::from_file(path)?;
        info!(
            "Parsed {} entries from {:?} ({} words)",
            document.entries().len(),
            path,
            document.word_count()
        );

        let video = if options.find_video || options.json {
            FileManager::find_media_file(path, self.config.media_extensions.as_slice())
        } else {
            None
        };

        write!(out, "{}", report::render_overview(path, &document, self.config.preview_words))?;

        if options.find_video {
            match &video {
                Some(video_path) => writeln!(out, "\n🎥 Found video file: {}", video_path.display())?,
                None => {
                    warn!("No video file found next to {:?}", path);
                    writeln!(out, "\n⚠️  No matching video file found")?;
                }
            }
        }

        if options.json {
            let record = DocumentReport::new(
                &document,
                self.config.summary_max_words,
                self.config.key_moments,
                video.as_deref(),
            );
            writeln!(out, "\n{}", "=".repeat(50))?;
            writeln!(out, "{}", record.to_json()?)?;
        }

        Ok(())
    }

    /// Process every `.srt` file under a directory.
    ///
    /// A failing file is logged and skipped; the run only fails when nothing
    /// could be processed.
    pub fn run_folder<W: Write>(&self, input_dir: &Path, options: RunOptions, out: &mut W) -> Result<FolderSummary> {
        let subtitle_files = FileManager::find_files(input_dir, "srt")?;
        if subtitle_files.is_empty() {
            return Err(anyhow!("No subtitle files found in directory: {:?}", input_dir));
        }
        debug!("Found {} subtitle file(s) in {:?}", subtitle_files.len(), input_dir);

        let mut summary = FolderSummary::default();
        for (i, subtitle_file) in subtitle_files.iter().enumerate() {
            if i > 0 {
                writeln!(out)?;
            }
            match self.process_file(subtitle_file, options, out) {
                Ok(()) => summary.processed += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {}", subtitle_file, e);
                    summary.failed += 1;
                }
            }
        }

        info!(
            "Finished processing {} file(s), {} failed",
            summary.processed, summary.failed
        );

        if summary.processed == 0 {
            return Err(anyhow!("None of the {} subtitle file(s) could be parsed", summary.failed));
        }

        Ok(summary)
    }
}
