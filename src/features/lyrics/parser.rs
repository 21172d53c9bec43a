//! Synced lyrics parsing module
//!
//! - `lrc`: the source's `[mm:ss.cc] text` subtitle body and timestamp labels
//! - `timeline`: normalization into a gap-free [`Timeline`]
//! - `types`: raw entries, lines and errors

mod lrc;
mod timeline;
mod types;

pub use lrc::{parse_subtitle_body, parse_timestamp, write_timestamp};
pub use timeline::{INSTRUMENTAL_TEXT, build_timeline};
pub use types::*;

/// Parse a subtitle body and build its timeline in one step
pub fn parse_synced_lyrics(body: &str, duration_ms: u64) -> Result<Timeline, TimelineError> {
    let entries = parse_subtitle_body(body)?;
    build_timeline(&RawLyrics::from_entries(entries), duration_ms)
}

/// Render a timeline back into a subtitle body
///
/// Synthetic padding lines are written as bare timestamps.
pub fn stringify_timeline(timeline: &Timeline) -> String {
    let capacity: usize = timeline.lines().iter().map(|l| l.text.len() + 12).sum();
    let mut result = String::with_capacity(capacity);

    for line in timeline.lines() {
        result.push('[');
        write_timestamp(&mut result, line.start_ms);
        result.push(']');
        if !line.is_blank() {
            result.push(' ');
            result.push_str(&line.text);
        }
        result.push('\n');
    }

    result
}
