//! Lyrics data types
//!
//! Raw entries as delivered by the lyrics source, and the normalized
//! gap-free timeline built from them.

use serde::{Deserialize, Serialize};

/// A single `(rangeLabel, text)` pair from the lyrics source
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawLyricEntry {
    /// Start timestamp label, `mm:ss.cc`
    pub label: String,
    /// Line text (empty for an instrumental gap)
    #[serde(default)]
    pub text: String,
}

impl RawLyricEntry {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// Check if the entry carries no text (whitespace only)
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Raw synced-lyrics payload for one song
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawLyrics {
    /// Entries in the order the source emitted them
    #[serde(default)]
    pub entries: Vec<RawLyricEntry>,
    /// The source flagged the track as instrumental
    #[serde(default)]
    pub instrumental: bool,
}

impl RawLyrics {
    pub fn from_entries(entries: Vec<RawLyricEntry>) -> Self {
        Self {
            entries,
            instrumental: false,
        }
    }

    pub fn instrumental() -> Self {
        Self {
            entries: Vec::new(),
            instrumental: true,
        }
    }
}

/// A single time-ranged line of a timeline
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricLine {
    /// Start time in milliseconds
    pub start_ms: u64,
    /// End time in milliseconds
    pub end_ms: u64,
    /// The line text, empty for an instrumental interval
    pub text: String,
}

impl LyricLine {
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Check if the line is an instrumental/blank interval
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Length of the interval, `0` if the range is inverted
    pub fn duration_ms(&self) -> u64 {
        self.end_ms.saturating_sub(self.start_ms)
    }
}

/// Gap-free ordered sequence of lyric lines for one song
///
/// Covers `[0, duration_ms]` with `lines[i].end_ms == lines[i + 1].start_ms`.
/// Built once per song by [`build_timeline`](super::build_timeline) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeline {
    lines: Vec<LyricLine>,
    duration_ms: u64,
}

impl Timeline {
    /// Wrap already-normalized lines. Callers outside the builder go through
    /// `build_timeline`, which establishes the contiguity invariant.
    pub(crate) fn from_normalized(lines: Vec<LyricLine>, duration_ms: u64) -> Self {
        debug_assert!(!lines.is_empty());
        debug_assert!(lines.windows(2).all(|w| w[0].end_ms == w[1].start_ms));
        Self { lines, duration_ms }
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&LyricLine> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Song duration the timeline was built against
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Whether the line at `index` is blank. Out-of-range counts as blank.
    pub fn is_blank(&self, index: usize) -> bool {
        self.lines.get(index).is_none_or(LyricLine::is_blank)
    }
}

/// Errors raised while building a timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    /// A range label could not be parsed as `mm:ss.cc`
    MalformedTimestamp { label: String },
    /// A non-instrumental payload carried no entries
    NoLines,
}

impl std::fmt::Display for TimelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineError::MalformedTimestamp { label } => {
                write!(f, "Malformed timestamp: {:?}", label)
            }
            TimelineError::NoLines => write!(f, "No synced lyric lines"),
        }
    }
}

impl std::error::Error for TimelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_duration() {
        assert_eq!(LyricLine::new(1000, 4000, "Hello").duration_ms(), 3000);
        assert_eq!(LyricLine::new(5000, 5000, "").duration_ms(), 0);
        // Fields are public, so an inverted range can be built by hand
        assert_eq!(LyricLine::new(5, 3, "Backwards").duration_ms(), 0);
    }

    #[test]
    fn test_blank_lookup() {
        let timeline = Timeline::from_normalized(
            vec![LyricLine::new(0, 1000, ""), LyricLine::new(1000, 2000, "Hi")],
            2000,
        );
        assert!(timeline.is_blank(0));
        assert!(!timeline.is_blank(1));
        assert!(timeline.is_blank(2));
    }
}
