/*!
 * Output records for a parsed subtitle document.
 *
 * `DocumentReport` is the JSON shape handed to downstream tools;
 * `render_overview` is the human-readable console form.
 */

use std::fmt::Write;
use std::path::Path;

use serde::Serialize;

use crate::subtitle_processor::{SubtitleDocument, SubtitleEntry};

/// One entry as it appears in the JSON record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntryRecord {
    pub index: usize,
    pub start_time: String,
    pub end_time: String,
    pub start_ms: u64,
    pub end_ms: u64,
    pub text: String,
}

impl From<&SubtitleEntry> for EntryRecord {
    fn from(entry: &SubtitleEntry) -> Self {
        EntryRecord {
            index: entry.sequence,
            start_time: entry.start.to_string(),
            end_time: entry.end.to_string(),
            start_ms: entry.start_ms(),
            end_ms: entry.end_ms(),
            text: entry.text.clone(),
        }
    }
}

/// Files found alongside the subtitle file
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RelatedFiles {
    pub video: Option<String>,
}

/// Serializable summary of a whole document
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentReport {
    pub subtitles: Vec<EntryRecord>,
    pub full_text: String,
    pub duration_ms: u64,
    pub word_count: usize,
    pub summary: String,
    pub key_moments: Vec<String>,
    pub files: RelatedFiles,
}

impl DocumentReport {
    /// Build the record, sampling the views with the given parameters
    pub fn new(
        document: &SubtitleDocument,
        summary_max_words: usize,
        key_moments: usize,
        video: Option<&Path>,
    ) -> Self {
        DocumentReport {
            subtitles: document.entries().iter().map(EntryRecord::from).collect(),
            full_text: document.full_text().to_string(),
            duration_ms: document.duration_ms(),
            word_count: document.word_count(),
            summary: document.summary(summary_max_words),
            key_moments: document
                .key_moments(key_moments)
                .into_iter()
                .map(str::to_string)
                .collect(),
            files: RelatedFiles {
                video: video.map(|path| path.display().to_string()),
            },
        }
    }

    /// Pretty-printed JSON, non-ASCII text kept verbatim
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Human-readable overview of a parsed file
pub fn render_overview(source: &Path, document: &SubtitleDocument, preview_words: usize) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "📹 Parsed subtitle file: {}", source.display());
    let _ = writeln!(out, "⏱️  Duration: {:.1} s", document.duration_ms() as f64 / 1000.0);
    let _ = writeln!(out, "📝 Words: {}", document.word_count());
    let _ = writeln!(out, "🎬 Entries: {}", document.entries().len());
    let _ = writeln!(out);
    let _ = writeln!(out, "📄 Preview:");
    let _ = writeln!(out, "{}", document.summary(preview_words));
    out
}
