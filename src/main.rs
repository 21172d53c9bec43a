//! Lyrisync - drives the lyric sync engine against a simulated player
//!
//! Usage: `lyrisync <lyrics.json> [--speed N]`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use lyrisync::features::Settings;
use lyrisync::features::lyrics::engine::{EngineConfig, LayoutConfig, LyricSyncEngine, StackedLayout};
use lyrisync::features::lyrics::{
    RawLyricEntry, RawLyrics, Timeline, build_timeline, parse_subtitle_body, write_timestamp,
};

/// Demo viewport in pixels
const CONTENT_WIDTH: i32 = 400;
const VIEWPORT_HEIGHT: i32 = 120;

/// How often the simulated player publishes progress
const PLAYER_PERIOD_MS: u64 = 50;

/// Lyrics file as fetched from the lyrics source
#[derive(Debug, Deserialize)]
struct LyricsPayload {
    duration_ms: u64,
    #[serde(default)]
    instrumental: bool,
    /// LRC-style `[mm:ss.cc] text` body
    subtitle_body: Option<String>,
    /// Pre-split entries, used when there is no subtitle body
    #[serde(default)]
    lines: Vec<RawLyricEntry>,
}

impl LyricsPayload {
    fn into_raw(self) -> anyhow::Result<RawLyrics> {
        let entries = match self.subtitle_body {
            Some(body) => parse_subtitle_body(&body).context("Malformed subtitle body")?,
            None => self.lines,
        };
        Ok(RawLyrics {
            entries,
            instrumental: self.instrumental,
        })
    }
}

/// Lyrisync - plays a synced lyrics file against a simulated player
#[derive(Parser, Debug)]
#[command(name = "lyrisync", version, about)]
struct Args {
    /// Lyrics payload (JSON)
    path: PathBuf,

    /// Playback speed multiplier
    #[arg(long, default_value_t = 1.0, value_parser = positive_speed)]
    speed: f64,
}

fn positive_speed(value: &str) -> Result<f64, String> {
    let speed: f64 = value
        .parse()
        .map_err(|_| format!("`{value}` is not a number"))?;
    if speed > 0.0 && speed.is_finite() {
        Ok(speed)
    } else {
        Err(format!("speed must be a positive number, got {value}"))
    }
}

fn load_timeline(args: &Args) -> anyhow::Result<Timeline> {
    let content = std::fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let payload: LyricsPayload = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.path.display()))?;
    let duration_ms = payload.duration_ms;
    let raw = payload.into_raw()?;
    build_timeline(&raw, duration_ms).context("No synced lyrics available")
}

/// Publish wall-clock playback progress until the song ends
async fn run_player(progress: watch::Sender<u64>, duration_ms: u64, speed: f64) {
    let start = Instant::now();
    let mut interval = tokio::time::interval(Duration::from_millis(PLAYER_PERIOD_MS));
    loop {
        interval.tick().await;
        let elapsed = (start.elapsed().as_secs_f64() * 1000.0 * speed) as u64;
        let position = elapsed.min(duration_ms);
        if progress.send(position).is_err() || position >= duration_ms {
            break;
        }
    }
    tracing::debug!("Player finished");
}

fn stamp(ms: u64) -> String {
    let mut s = String::new();
    write_timestamp(&mut s, ms);
    s
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let settings = Settings::load();
    let config = EngineConfig::from_settings(&settings.sync);
    let timeline = load_timeline(&args)?;
    let duration_ms = timeline.duration_ms();

    let mut surface = StackedLayout::new(LayoutConfig::default(), CONTENT_WIDTH, VIEWPORT_HEIGHT);
    surface.layout(&timeline);

    let tick_period = Duration::from_millis(config.tick_interval_ms);
    let mut engine = LyricSyncEngine::new(config, surface);
    engine.load_timeline(timeline);

    let (tx, mut rx) = watch::channel(0u64);
    let player = tokio::spawn(run_player(tx, duration_ms, args.speed));

    let mut ticker = tokio::time::interval(tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut shown_line = None;
    let mut shown_offset = 0;
    loop {
        ticker.tick().await;
        let progress = *rx.borrow_and_update();
        engine.tick(progress);

        let highlight = engine.highlight();
        if highlight.active_line() != shown_line {
            shown_line = highlight.active_line();
            if let Some(index) = shown_line {
                let text = engine
                    .timeline()
                    .and_then(|t| t.get(index))
                    .map_or("", |line| line.text.as_str());
                tracing::info!(
                    "[{}] line {} ({}): {}",
                    stamp(progress),
                    index,
                    highlight.last_transition().unwrap_or_default(),
                    text
                );
            }
        }

        let offset = engine.surface().scroll_offset_px();
        if offset != shown_offset {
            shown_offset = offset;
            tracing::debug!("Scrolled to {}px", offset);
        }

        if progress >= duration_ms && !engine.highlight().is_animating() {
            break;
        }
    }

    player.await.context("Player task failed")?;
    tracing::info!("Playback finished at {}", stamp(duration_ms));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["lyrisync", "demos/hello.json"]).unwrap();
        assert_eq!(args.path, PathBuf::from("demos/hello.json"));
        assert_eq!(args.speed, 1.0);

        let args = Args::try_parse_from(["lyrisync", "song.json", "--speed", "2.5"]).unwrap();
        assert_eq!(args.speed, 2.5);
    }

    #[test]
    fn test_args_reject_bad_speed() {
        for speed in ["0", "-1", "inf", "NaN", "fast"] {
            assert!(
                Args::try_parse_from(["lyrisync", "song.json", "--speed", speed]).is_err(),
                "accepted --speed {speed}"
            );
        }
        assert!(Args::try_parse_from(["lyrisync"]).is_err());
        assert!(Args::try_parse_from(["lyrisync", "a.json", "b.json"]).is_err());
    }
}
