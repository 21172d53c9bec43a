//! Line-level LRC subtitle parser
//!
//! The lyrics source delivers synced lyrics as an LRC-style subtitle body,
//! one `[mm:ss.cc] text` per line. A bare `[mm:ss.cc]` marks an instrumental
//! gap.

use super::types::{RawLyricEntry, TimelineError};

fn malformed(label: &str) -> TimelineError {
    TimelineError::MalformedTimestamp {
        label: label.to_string(),
    }
}

fn parse_digits(part: &str, label: &str) -> Result<u64, TimelineError> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(label));
    }
    part.parse().map_err(|_| malformed(label))
}

/// Parse a `mm:ss.cc` label into milliseconds
///
/// The fractional part is normally centiseconds; one digit is read as
/// tenths and three as milliseconds.
pub fn parse_timestamp(label: &str) -> Result<u64, TimelineError> {
    let trimmed = label.trim();
    let (min_str, rest) = trimmed.split_once(':').ok_or_else(|| malformed(label))?;
    let (sec_str, frac_str) = rest.split_once('.').ok_or_else(|| malformed(label))?;

    let min = parse_digits(min_str, label)?;
    let sec = parse_digits(sec_str, label)?;
    let frac = parse_digits(frac_str, label)?;

    let frac_ms = match frac_str.len() {
        1 => frac * 100,
        2 => frac * 10,
        3 => frac,
        _ => return Err(malformed(label)),
    };

    Ok(min * 60_000 + sec * 1000 + frac_ms)
}

/// Split one subtitle line into its label and text
fn parse_line(line: &str) -> Result<RawLyricEntry, TimelineError> {
    let line = line.trim();
    let inner = line.strip_prefix('[').ok_or_else(|| malformed(line))?;
    let (label, text) = inner.split_once(']').ok_or_else(|| malformed(line))?;

    // Validate eagerly so the error names the offending label
    parse_timestamp(label)?;

    Ok(RawLyricEntry::new(label.trim(), text.trim()))
}

/// Parse a subtitle body into raw entries, preserving source order
pub fn parse_subtitle_body(body: &str) -> Result<Vec<RawLyricEntry>, TimelineError> {
    body.lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect()
}

/// Write timestamp in the source's `mm:ss.cc` form
pub fn write_timestamp(result: &mut String, time_ms: u64) {
    use std::fmt::Write;
    let cs = (time_ms % 1000) / 10;
    let sec = (time_ms / 1000) % 60;
    let min = time_ms / 60_000;
    let _ = write!(result, "{:02}:{:02}.{:02}", min, sec, cs);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("00:01.12"), Ok(1120));
        assert_eq!(parse_timestamp("01:10.50"), Ok(70_500));
        assert_eq!(parse_timestamp("00:00.00"), Ok(0));
        assert_eq!(parse_timestamp("03:05.7"), Ok(185_700));
        assert_eq!(parse_timestamp("00:10.254"), Ok(10_254));
    }

    #[test]
    fn test_parse_timestamp_rejects_non_numeric() {
        for label in ["0a:01.12", "00:b1.12", "00:01.x2", "00:01", "0001.12", ":01.12", "00:01.1234", "-1:01.12"] {
            assert_eq!(
                parse_timestamp(label),
                Err(TimelineError::MalformedTimestamp {
                    label: label.to_string()
                }),
                "label {label:?}"
            );
        }
    }

    #[test]
    fn test_parse_line() {
        let entry = parse_line("[00:01.12] test LyRiC").unwrap();
        assert_eq!(entry.label, "00:01.12");
        assert_eq!(entry.text, "test LyRiC");

        let blank = parse_line("[00:20.00]").unwrap();
        assert!(blank.is_blank());
    }

    #[test]
    fn test_parse_subtitle_body() {
        let body = "[00:00.50] First line\n[00:05.00] Second line\n\n[00:09.00]\n[00:10.00] Third line\n";
        let entries = parse_subtitle_body(body).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].text, "First line");
        assert_eq!(entries[2].label, "00:09.00");
        assert!(entries[2].is_blank());
    }

    #[test]
    fn test_parse_subtitle_body_malformed_line() {
        let body = "[00:00.50] ok\nno timestamp here";
        assert!(matches!(
            parse_subtitle_body(body),
            Err(TimelineError::MalformedTimestamp { .. })
        ));
    }

    #[test]
    fn test_write_timestamp() {
        let mut out = String::new();
        write_timestamp(&mut out, 70_500);
        assert_eq!(out, "01:10.50");
        assert_eq!(parse_timestamp(&out), Ok(70_500));
    }
}
