use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use walkdir::WalkDir;

use crate::errors::SubtitleError;

// @module: File and directory utilities

/// Media containers probed next to a subtitle file, highest fidelity first
pub const DEFAULT_MEDIA_EXTENSIONS: [&str; 6] = [".mov", ".mp4", ".avi", ".mkv", ".flv", ".wmv"];

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_dir()
    }

    /// Read a subtitle source fully into memory
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, SubtitleError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SubtitleError::SourceNotFound(path.to_path_buf()));
        }

        fs::read_to_string(path).map_err(|source| SubtitleError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find files with a specific extension under a directory, sorted by path
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let wanted = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() {
                if let Some(ext) = path.extension() {
                    if ext.to_string_lossy().eq_ignore_ascii_case(wanted) {
                        result.push(path.to_path_buf());
                    }
                }
            }
        }

        result.sort();
        Ok(result)
    }

    /// Locate the media file that shares a subtitle file's base name.
    ///
    /// Probes `<dir>/<stem><ext>` for each extension in order and returns the
    /// first one that exists. Extensions may omit the leading dot.
    pub fn find_media_file<P, S>(subtitle_path: P, extensions: &[S]) -> Option<PathBuf>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let subtitle_path = subtitle_path.as_ref();
        let stem = subtitle_path.file_stem()?.to_string_lossy();
        let parent = subtitle_path.parent().unwrap_or(Path::new(""));

        extensions
            .iter()
            .map(|ext| {
                let ext = ext.as_ref().trim_start_matches('.');
                parent.join(format!("{}.{}", stem, ext))
            })
            .find(|candidate| {
                let found = Self::file_exists(candidate);
                debug!("Probing media file {:?}: {}", candidate, if found { "found" } else { "missing" });
                found
            })
    }
}
