//! Timeline normalization
//!
//! Turns the raw `(label, text)` list into a gap-free ordered timeline:
//! timestamps are parsed, doubled instrumental gaps are collapsed, end times
//! are derived from the following line, and synthetic blank lines pad the
//! start and end of the song.

use super::lrc::parse_timestamp;
use super::types::{LyricLine, RawLyrics, Timeline, TimelineError};

/// Text shown for the single line of an instrumental track
pub const INSTRUMENTAL_TEXT: &str = "Instrumental";

/// Build a timeline for one song
pub fn build_timeline(raw: &RawLyrics, duration_ms: u64) -> Result<Timeline, TimelineError> {
    if raw.instrumental {
        tracing::info!("Instrumental track, single line over {} ms", duration_ms);
        return Ok(Timeline::from_normalized(
            vec![LyricLine::new(0, duration_ms, INSTRUMENTAL_TEXT)],
            duration_ms,
        ));
    }

    if raw.entries.is_empty() {
        return Err(TimelineError::NoLines);
    }

    let mut starts = raw
        .entries
        .iter()
        .map(|entry| {
            let start = parse_timestamp(&entry.label)?.min(duration_ms);
            Ok((start, entry.text.trim().to_string()))
        })
        .collect::<Result<Vec<(u64, String)>, TimelineError>>()
        .inspect_err(|e| tracing::warn!("Discarding synced lyrics: {}", e))?;

    // Stable: equal starts keep their source order
    starts.sort_by_key(|(start, _)| *start);

    // A blank directly after another blank adds nothing visible
    starts.dedup_by(|next, prev| next.1.is_empty() && prev.1.is_empty());

    // `entries` is non-empty, so `starts` is too
    if starts[0].1.is_empty() {
        starts[0].0 = 0;
    } else if starts[0].0 != 0 {
        starts.insert(0, (0, String::new()));
    }

    let mut lines: Vec<LyricLine> = Vec::with_capacity(starts.len() + 1);
    for (i, (start, text)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(duration_ms, |(next, _)| *next);
        lines.push(LyricLine::new(*start, end, text.clone()));
    }

    if let Some(last) = lines.last() {
        if !last.is_blank() {
            let tail_start = last.end_ms;
            lines.push(LyricLine::new(tail_start, duration_ms, ""));
        }
    }

    tracing::info!(
        "Built timeline: {} lines from {} entries over {} ms",
        lines.len(),
        raw.entries.len(),
        duration_ms
    );

    Ok(Timeline::from_normalized(lines, duration_ms))
}
