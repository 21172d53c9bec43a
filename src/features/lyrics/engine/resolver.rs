//! Active-line resolution
//!
//! Maps a playback position to the timeline line whose range contains it.
//! A position on a boundary belongs to the line starting there.

use crate::features::lyrics::parser::Timeline;

/// Default sync offset in milliseconds. Negative triggers lines early.
pub const DEFAULT_SYNC_OFFSET_MS: i64 = -50;

/// Index of the active line at `position_ms`
///
/// Positions past the end clamp to the last line. The result is
/// non-decreasing in `position_ms`.
pub fn resolve(timeline: &Timeline, position_ms: u64) -> usize {
    let lines = timeline.lines();
    let clamped = position_ms.min(timeline.duration_ms());
    // First line always starts at 0, so at least one line qualifies
    lines
        .partition_point(|line| line.start_ms <= clamped)
        .saturating_sub(1)
}

/// Apply the sync offset to a progress value, clamped into the song
pub fn adjust_progress(timeline: &Timeline, progress_ms: u64, offset_ms: i64) -> u64 {
    let progress = i64::try_from(progress_ms).unwrap_or(i64::MAX);
    let duration = i64::try_from(timeline.duration_ms()).unwrap_or(i64::MAX);
    progress.saturating_sub(offset_ms).clamp(0, duration) as u64
}

/// Resolve with the sync offset applied
pub fn resolve_with_offset(timeline: &Timeline, progress_ms: u64, offset_ms: i64) -> usize {
    resolve(timeline, adjust_progress(timeline, progress_ms, offset_ms))
}
