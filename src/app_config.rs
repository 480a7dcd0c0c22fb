use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::file_utils::DEFAULT_MEDIA_EXTENSIONS;
use crate::subtitle_processor::{DEFAULT_KEY_MOMENTS, DEFAULT_SUMMARY_WORDS};

/// Application configuration module
/// This module handles loading and validating the settings that shape the
/// derived views and the media file lookup.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Word budget for the summary in the JSON record
    #[serde(default = "default_summary_max_words")]
    pub summary_max_words: usize,

    /// Number of key moments in the JSON record
    #[serde(default = "default_key_moments")]
    pub key_moments: usize,

    /// Word budget for the console preview
    #[serde(default = "default_preview_words")]
    pub preview_words: usize,

    /// Media extensions probed next to the subtitle file, in priority order
    #[serde(default = "default_media_extensions")]
    pub media_extensions: Vec<String>,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

fn default_summary_max_words() -> usize {
    DEFAULT_SUMMARY_WORDS
}

fn default_key_moments() -> usize {
    DEFAULT_KEY_MOMENTS
}

fn default_preview_words() -> usize {
    300
}

fn default_media_extensions() -> Vec<String> {
    DEFAULT_MEDIA_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

impl Config {
    /// Load configuration from a JSON file, falling back to defaults when the
    /// file does not exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.summary_max_words == 0 {
            return Err(anyhow!("summary_max_words must be greater than zero"));
        }

        if self.key_moments == 0 {
            return Err(anyhow!("key_moments must be greater than zero"));
        }

        if self.media_extensions.iter().all(|ext| ext.trim_start_matches('.').is_empty()) {
            return Err(anyhow!("media_extensions must name at least one extension"));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_max_words: default_summary_max_words(),
            key_moments: default_key_moments(),
            preview_words: default_preview_words(),
            media_extensions: default_media_extensions(),
            log_level: LogLevel::default(),
        }
    }
}
