//! Lyric sync engine
//!
//! Follows playback progress through a [`Timeline`], animating a highlight
//! rectangle onto the active line and keeping it centered by auto-scrolling.
//!
//! ## Architecture
//!
//! - `resolver`: playback position to active line index
//! - `highlight`: phase machine that moves the highlight between lines
//! - `scroll`: auto-scroll controller with eased jumps
//! - `easing`: decile step table shared by both animations
//! - `surface`: what the engine needs from a renderer
//! - `layout`: a stacked-text surface for hosts without their own layout
//!
//! The engine owns all mutable state and is driven by a single caller
//! ticking at a fixed period. Nothing in here blocks or spawns.

pub mod easing;
pub mod highlight;
pub mod layout;
pub mod resolver;
pub mod scroll;
pub mod surface;
pub mod types;

// Re-exports for convenience
pub use easing::{EASING, EasingTable};
pub use highlight::{HighlightPhase, HighlightState};
pub use layout::{LayoutConfig, StackedLayout};
pub use resolver::{DEFAULT_SYNC_OFFSET_MS, resolve, resolve_with_offset};
pub use scroll::{AutoScroll, ScrollConfig, ScrollState};
pub use surface::RenderSurface;
pub use types::Geometry;

use crate::features::lyrics::parser::Timeline;
use crate::features::settings::SyncSettings;

/// Default tick period in milliseconds
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 15;

/// Configuration for the sync engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Subtracted from progress before resolving. Negative triggers early.
    pub sync_offset_ms: i64,
    /// Period the driver is expected to tick at
    pub tick_interval_ms: u64,
    /// Auto-scroll tuning
    pub scroll: ScrollConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sync_offset_ms: DEFAULT_SYNC_OFFSET_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            scroll: ScrollConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Build the runtime config from persisted settings
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            sync_offset_ms: settings.sync_offset_ms,
            tick_interval_ms: settings.tick_interval_ms.max(1),
            scroll: ScrollConfig {
                threshold_px: settings.scroll_threshold_px.max(0.0),
                hysteresis_px: settings.scroll_hysteresis_px.max(0.0),
                jump_speed: if settings.jump_speed > 0.0 {
                    settings.jump_speed
                } else {
                    ScrollConfig::default().jump_speed
                },
            },
        }
    }
}

/// Main sync engine - one instance per displayed song session
pub struct LyricSyncEngine<S: RenderSurface> {
    /// Configuration
    config: EngineConfig,
    /// Where lines are measured and the highlight is drawn
    surface: S,
    /// Timeline of the current song, if it has synced lyrics
    timeline: Option<Timeline>,
    /// Highlight animation state
    highlight: HighlightState,
    /// Auto-scroll controller
    scroll: AutoScroll,
    /// Progress passed to the previous tick
    last_progress: Option<u64>,
    /// Line boxes moved since the highlight was last placed
    relayout_pending: bool,
}

impl<S: RenderSurface> LyricSyncEngine<S> {
    pub fn new(config: EngineConfig, surface: S) -> Self {
        let scroll = AutoScroll::new(config.scroll);
        Self {
            config,
            surface,
            timeline: None,
            highlight: HighlightState::new(),
            scroll,
            last_progress: None,
            relayout_pending: false,
        }
    }

    /// Start a new song session with `timeline`
    pub fn load_timeline(&mut self, timeline: Timeline) {
        self.on_song_changed();
        tracing::info!(
            "Loaded timeline: {} lines over {}ms",
            timeline.len(),
            timeline.duration_ms()
        );
        self.timeline = Some(timeline);
    }

    /// Drop the current song and everything animating for it
    pub fn on_song_changed(&mut self) {
        tracing::info!("Song changed, resetting sync state");
        self.timeline = None;
        self.highlight.reset();
        self.scroll.reset();
        self.last_progress = None;
        self.relayout_pending = false;
        self.surface.set_scroll(0.0);
        self.surface.draw_highlight(None);
    }

    /// Advance resolver, highlight and scroll by one step
    ///
    /// A repeated `progress_ms` with nothing animating or pending is a no-op.
    pub fn tick(&mut self, progress_ms: u64) {
        let Some(timeline) = self.timeline.as_ref() else {
            return;
        };

        let resolved = resolve_with_offset(timeline, progress_ms, self.config.sync_offset_ms);
        let repeated = self.last_progress == Some(progress_ms);
        self.last_progress = Some(progress_ms);

        if repeated
            && !self.highlight.is_animating()
            && self.highlight.active_line() == Some(resolved)
            && !self.scroll.needs_tick()
            && !self.relayout_pending
        {
            return;
        }

        let mut redraw = false;
        if self.relayout_pending {
            if let Some(changed) = self.highlight.resnap(timeline, &self.surface) {
                self.relayout_pending = false;
                redraw |= changed;
            }
        }
        redraw |= self.highlight.update(resolved, timeline, &self.surface);
        if redraw {
            self.surface.draw_highlight(self.highlight.current());
        }

        self.scroll.update(self.highlight.current(), &mut self.surface);
    }

    pub fn set_auto_scroll(&mut self, enabled: bool) {
        self.scroll.set_enabled(enabled);
    }

    /// Manual wheel or scrollbar input; turns auto-scroll off
    pub fn on_manual_scroll(&mut self) {
        self.scroll.on_manual_scroll();
    }

    /// The surface re-laid out its lines (resize, font change)
    pub fn on_layout_changed(&mut self) {
        self.relayout_pending = true;
    }

    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    pub fn scroll(&self) -> &ScrollState {
        self.scroll.state()
    }

    pub fn timeline(&self) -> Option<&Timeline> {
        self.timeline.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Get the current configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
