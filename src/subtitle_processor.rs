use std::fmt;
use std::path::Path;
use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;
use crate::file_utils::FileManager;

// @module: SRT parsing and content aggregation

// @const: Separator between blocks, any whitespace run holding a blank line
static BLOCK_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @const: SRT time range line, anchored at line start
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})\s*-->\s*([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})").unwrap()
});

// @const: Loose single timestamp, used for millisecond conversion
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+):([0-9]+):([0-9]+),([0-9]+)").unwrap()
});

// @const: Inline markup such as <i>, </font>, <font color="red">
static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]+>").unwrap()
});

/// Marker appended to a truncated summary
pub const ELLIPSIS: &str = "...";

/// Default word budget for [`SubtitleDocument::summary`]
pub const DEFAULT_SUMMARY_WORDS: usize = 200;

/// Default sample size for [`SubtitleDocument::key_moments`]
pub const DEFAULT_KEY_MOMENTS: usize = 5;

/// An SRT timestamp (`HH:MM:SS,mmm`)
///
/// Field order matches significance, so the derived ordering agrees with
/// [`Timestamp::to_ms`] for in-range values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub millis: u32,
}

impl Timestamp {
    pub fn new(hours: u32, minutes: u32, seconds: u32, millis: u32) -> Self {
        Timestamp { hours, minutes, seconds, millis }
    }

    /// Parse a timestamp string leniently.
    ///
    /// Anything that does not look like `H:M:S,ms` becomes a zero timestamp
    /// instead of an error.
    pub fn parse(value: &str) -> Self {
        let Some(caps) = TIMESTAMP_REGEX.captures(value.trim()) else {
            return Self::default();
        };

        let field = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
        match (field(1), field(2), field(3), field(4)) {
            (Some(h), Some(m), Some(s), Some(ms)) => Self::new(h, m, s, ms),
            _ => Self::default(),
        }
    }

    /// Build a timestamp from a millisecond offset
    pub fn from_ms(ms: u64) -> Self {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        Timestamp {
            hours: u32::try_from(hours).unwrap_or(u32::MAX),
            minutes: minutes as u32,
            seconds: seconds as u32,
            millis: millis as u32,
        }
    }

    pub fn to_ms(&self) -> u64 {
        u64::from(self.hours) * 3_600_000
            + u64::from(self.minutes) * 60_000
            + u64::from(self.seconds) * 1_000
            + u64::from(self.millis)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02},{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}

// @struct: Single parsed subtitle block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Declared sequence number, not checked against position
    pub sequence: usize,

    // @field: Start of display
    pub start: Timestamp,

    // @field: End of display, not enforced to be after start
    pub end: Timestamp,

    // @field: Text lines joined by newline, markup removed
    pub text: String,
}

impl SubtitleEntry {
    pub fn new(sequence: usize, start: Timestamp, end: Timestamp, text: String) -> Self {
        SubtitleEntry { sequence, start, end, text }
    }

    pub fn start_ms(&self) -> u64 {
        self.start.to_ms()
    }

    pub fn end_ms(&self) -> u64 {
        self.end.to_ms()
    }

    /// Display time in milliseconds, zero when the range is inverted
    pub fn duration_ms(&self) -> u64 {
        self.end_ms().saturating_sub(self.start_ms())
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.sequence)?;
        writeln!(f, "{} --> {}", self.start, self.end)?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Split raw SRT content into candidate blocks.
///
/// The content is trimmed first; blocks that are blank after trimming are
/// dropped.
pub fn split_blocks(content: &str) -> Vec<&str> {
    BLOCK_SEPARATOR_REGEX
        .split(content.trim())
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect()
}

/// Parse one block into an entry, or `None` when it is malformed.
pub fn parse_block(block: &str) -> Option<SubtitleEntry> {
    let lines: Vec<&str> = block.trim().lines().collect();
    if lines.len() < 3 {
        debug!("Discarding block with {} line(s), need at least 3", lines.len());
        return None;
    }

    let sequence = match lines[0].trim().parse::<usize>() {
        Ok(sequence) => sequence,
        Err(_) => {
            debug!("Discarding block with invalid sequence number: {:?}", lines[0]);
            return None;
        }
    };

    let Some(caps) = TIME_RANGE_REGEX.captures(lines[1].trim()) else {
        debug!("Discarding block {} with invalid time range: {:?}", sequence, lines[1]);
        return None;
    };
    let start = Timestamp::parse(&caps[1]);
    let end = Timestamp::parse(&caps[2]);

    let text = lines[2..].join("\n");
    let text = MARKUP_TAG_REGEX.replace_all(text.trim(), "").into_owned();

    Some(SubtitleEntry::new(sequence, start, end, text))
}

/// Parse every well-formed block, in appearance order.
///
/// Malformed blocks are skipped; the result may be empty.
pub fn parse_entries(content: &str) -> Vec<SubtitleEntry> {
    let blocks = split_blocks(content);
    let total_blocks = blocks.len();

    let entries: Vec<SubtitleEntry> = blocks.into_iter().filter_map(parse_block).collect();

    if entries.len() < total_blocks {
        debug!(
            "Parsed {} of {} blocks, {} discarded",
            entries.len(),
            total_blocks,
            total_blocks - entries.len()
        );
    }

    entries
}

/// A parsed subtitle file with its derived fields.
///
/// Built once from a non-empty entry list. The derived fields are computed at
/// construction and there is no way to mutate the entries afterwards, so they
/// always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleDocument {
    entries: Vec<SubtitleEntry>,
    full_text: String,
    duration_ms: u64,
    word_count: usize,
}

impl SubtitleDocument {
    /// Aggregate parsed entries into a document.
    ///
    /// Fails with [`SubtitleError::NoParsableContent`] when `entries` is empty.
    pub fn from_entries(entries: Vec<SubtitleEntry>) -> Result<Self, SubtitleError> {
        let Some(last) = entries.last() else {
            return Err(SubtitleError::NoParsableContent);
        };
        let duration_ms = last.end_ms();

        let full_text = entries
            .iter()
            .map(|entry| entry.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let word_count = full_text.split_whitespace().count();

        Ok(SubtitleDocument {
            entries,
            full_text,
            duration_ms,
            word_count,
        })
    }

    /// Parse SRT content into a document
    pub fn parse(content: &str) -> Result<Self, SubtitleError> {
        Self::from_entries(parse_entries(content))
    }

    /// Read and parse an SRT file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SubtitleError> {
        let content = FileManager::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn entries(&self) -> &[SubtitleEntry] {
        &self.entries
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    /// End of the last entry, in milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// The full text, or its first `max_words` words followed by an ellipsis.
    ///
    /// Truncated summaries are rejoined with single spaces, so line breaks are
    /// not preserved.
    pub fn summary(&self, max_words: usize) -> String {
        if self.word_count <= max_words {
            return self.full_text.clone();
        }

        let mut summary = self
            .full_text
            .split_whitespace()
            .take(max_words)
            .collect::<Vec<_>>()
            .join(" ");
        summary.push_str(ELLIPSIS);
        summary
    }

    /// Texts of up to `n` entries sampled at an even index stride.
    ///
    /// With more than `n` entries the stride is `len / n` starting at index 0,
    /// so the tail may be skipped when the division is not exact.
    pub fn key_moments(&self, n: usize) -> Vec<&str> {
        if n == 0 {
            return Vec::new();
        }
        if self.entries.len() <= n {
            return self.entries.iter().map(|entry| entry.text.as_str()).collect();
        }

        let step = self.entries.len() / n;
        (0..n)
            .map(|i| self.entries[i * step].text.as_str())
            .collect()
    }
}

impl FromStr for SubtitleDocument {
    type Err = SubtitleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for SubtitleDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for entry in &self.entries {
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}
